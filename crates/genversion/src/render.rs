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

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::GenVersionError;

/// Where the artifact goes when no path is given, relative to the working
/// directory.
pub const DEFAULT_OUTPUT: &str = "version.rs";

/// The value embedded into the generated artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRecord {
    /// RFC3339 timestamp; may be empty.
    pub date: String,
}

pub fn render_version(w: &mut impl Write, version: &VersionRecord) -> io::Result<()> {
    writeln!(w, "// --------  DO NOT EDIT --------")?;
    writeln!(
        w,
        "// This file is autogenerated by genversion during the release process."
    )?;
    writeln!(w)?;
    writeln!(
        w,
        "/// Release timestamp of this build, in RFC3339 with nanosecond precision."
    )?;
    writeln!(
        w,
        "pub const VERSION: &str = \"{}\";",
        version.date.escape_default()
    )
}

fn create_truncated(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

/// Render `version` into the file at `path`, replacing whatever was there.
///
/// The file is created owner read/write only when it does not exist yet.
pub fn write_version(path: &Path, version: &VersionRecord) -> Result<(), GenVersionError> {
    debug!("writing version artifact to {}", path.display());

    let file = create_truncated(path).map_err(|source| GenVersionError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let file = render_buffered(file, path, version)?;
    file.sync_all().map_err(|source| GenVersionError::Render {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("wrote VERSION = {:?}", version.date);
    Ok(())
}

/// Render through a buffer and flush it, handing back the inner writer.
/// `path` only labels the error.
fn render_buffered<W: Write>(
    inner: W,
    path: &Path,
    version: &VersionRecord,
) -> Result<W, GenVersionError> {
    let render_err = |source: io::Error| GenVersionError::Render {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(inner);
    render_version(&mut writer, version).map_err(render_err)?;
    writer.into_inner().map_err(|e| render_err(e.into_error()))
}
