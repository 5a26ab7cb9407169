// genversion: Release tag and version artifact generator.
// Copyright (C) 2024 International Digital Economy Academy
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//
// For inquiries, you can contact us via e-mail at jichuruanjian@idea.edu.cn.

//! Release tag computation and version artifact generation.
//!
//! Formatting the timestamp strings is kept apart from writing the artifact:
//! [`stamp`] is pure and works on a fixed instant, [`render`] does the I/O.

mod error;
pub mod render;
pub mod stamp;

pub use error::GenVersionError;
pub use render::{DEFAULT_OUTPUT, VersionRecord, render_version, write_version};
pub use stamp::ReleaseStamp;
