use std::{fs, path::Path};

use crate::error::{Error, Result};

/// Source suffixes accepted in strict mode
const STRICT_EXTENSIONS: [&str; 2] = ["bin", "BIN"];

/// Checks that `path` names a `.bin` or `.BIN` file.
pub fn check_extension(path: &Path) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if STRICT_EXTENSIONS.contains(&ext) => Ok(()),
        _ => Err(Error::UnsupportedExtension(path.to_path_buf())),
    }
}

/// Reads the whole source file. With `strict` only `.bin` files are accepted.
pub fn read_source(path: &Path, strict: bool) -> Result<Vec<u8>> {
    if strict {
        check_extension(path)?;
    }
    let data = fs::read(path)?;
    log::info!("Read {} byte(s) from {}", data.len(), path.display());
    Ok(data)
}

#[test]
fn strict_suffix_check() {
    assert!(check_extension(Path::new("dump.bin")).is_ok());
    assert!(check_extension(Path::new("dir/DUMP.BIN")).is_ok());
    assert!(matches!(
        check_extension(Path::new("dump.Bin")),
        Err(Error::UnsupportedExtension(_))
    ));
    assert!(check_extension(Path::new("dump.png")).is_err());
    assert!(check_extension(Path::new("bin")).is_err());
}

#[test]
fn strict_mode_rejects_before_reading() {
    let missing = Path::new("definitely/not/here.dat");
    assert!(matches!(
        read_source(missing, true),
        Err(Error::UnsupportedExtension(_))
    ));
    assert!(matches!(read_source(missing, false), Err(Error::Io(_))));
}
