use std::{
    fs,
    path::{Path, PathBuf},
};

pub fn write(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).expect("write scratch file");
    path
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
