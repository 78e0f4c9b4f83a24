use std::fs::Permissions;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

fn write_error(path: &Path, source: std::io::Error) -> Error {
    Error::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Mode requested for new files; the process umask is applied on creation,
/// as it would be for a plain `File::create`.
#[cfg(unix)]
fn creation_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn creation_permissions() -> Option<Permissions> {
    None
}

/// Write `output` through a temporary sibling file that is renamed over it once
/// `write` has succeeded. On failure `output` is left as it was.
///
/// An existing `output` keeps its permissions; a new one gets the same mode a
/// plain `File::create` would give it.
pub fn write_atomically<F>(output: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let existing = std::fs::metadata(output).ok().map(|m| m.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".svgpng-").suffix(".tmp");
    if let Some(perms) = creation_permissions() {
        builder.permissions(perms);
    }
    let mut tmp = builder
        .tempfile_in(dir)
        .map_err(|e| write_error(output, e))?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer)?;
        writer.flush().map_err(|e| write_error(output, e))?;
    }
    if let Some(perms) = existing {
        tmp.as_file()
            .set_permissions(perms)
            .map_err(|e| write_error(output, e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| write_error(output, e))?;

    debug!("Persisting {:?} to {:?}", tmp.path(), output);
    tmp.persist(output).map_err(|e| write_error(output, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_write_leaves_target_and_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data.bin");
        std::fs::write(&out, b"old").unwrap();

        let err = write_atomically(&out, |w| {
            w.write_all(b"partial")?;
            Err(Error::Processing("encoder gave up".into()))
        })
        .unwrap_err();

        assert!(matches!(err, Error::Processing(_)));
        assert_eq!(std::fs::read(&out).unwrap(), b"old");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data.bin");
        std::fs::write(&out, b"old").unwrap();

        write_atomically(&out, |w| Ok(w.write_all(b"new")?)).unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("icon.png");
        std::fs::write(&out, b"old").unwrap();
        std::fs::set_permissions(&out, Permissions::from_mode(0o640)).unwrap();

        write_atomically(&out, |w| Ok(w.write_all(b"new")?)).unwrap();
        let mode = std::fs::metadata(&out).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn new_file_gets_umask_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.png");
        std::fs::write(&plain, b"x").unwrap();
        let out = dir.path().join("fresh.png");

        write_atomically(&out, |w| Ok(w.write_all(b"x")?)).unwrap();
        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&out), mode(&plain));
    }
}
