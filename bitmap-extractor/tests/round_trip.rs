mod common;

use std::fs;

use bitmap_extractor::{
    config::Options,
    png::{load_image, save_image},
    raw::{self, strip_trailing_zeros},
    session::{EditorSession, Event, Notification, Outcome, Response},
    BitDepth, Error,
};
use common::{init_logging, write};
use tempfile::tempdir;

fn sample_bytes() -> Vec<u8> {
    let mut bytes: Vec<u8> = (0..200u32).map(|i| (i * 7 + 3) as u8).collect();
    bytes.extend_from_slice(&[0, 0, 0]);
    bytes
}

#[test]
fn eight_bit_file_survives_png_round_trip() {
    init_logging();
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "dump.bin", &sample_bytes());

    let mut session = EditorSession::new(Options {
        width: 16,
        mode: BitDepth::EightBit,
        ..Default::default()
    });
    session.handle(Event::OpenFile(input)).unwrap();
    assert_eq!(session.handle(Event::Process).unwrap(), Outcome::Redraw);

    let png = dir.path().join("out/image.png");
    assert_eq!(
        session.handle(Event::SaveImage(png.clone())).unwrap(),
        Outcome::Saved(png.clone())
    );

    let reloaded = load_image(&png).unwrap();
    assert_eq!(Some(&reloaded), session.raster());

    let bin = dir.path().join("out/packed.bin");
    session.handle(Event::SaveBin(bin.clone())).unwrap();
    let packed = fs::read(&bin).unwrap();
    let bytes = sample_bytes();
    let stripped = strip_trailing_zeros(&bytes);
    assert_eq!(packed, &stripped[..stripped.len() / 16 * 16]);
}

#[test]
fn one_bit_edit_is_written_back() {
    init_logging();
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "dump.BIN", &[0xFF, 0x00, 0x0F, 0x00]);

    let mut session = EditorSession::new(Options {
        width: 4,
        strict_extension: true,
        ..Default::default()
    });
    session.handle(Event::OpenFile(input)).unwrap();
    session.handle(Event::Process).unwrap();
    let raster = session.raster().unwrap();
    assert_eq!((raster.width(), raster.height()), (4, 6));

    // Top-left pixel goes from white to black
    assert_eq!(
        session.handle(Event::Click { x: 0.2, y: 0.7 }).unwrap(),
        Outcome::Redraw
    );
    let bin = dir.path().join("edited.bin");
    session.handle(Event::SaveBin(bin.clone())).unwrap();
    assert_eq!(fs::read(&bin).unwrap(), vec![0x7F, 0x00, 0x0F]);
}

#[test]
fn pgm_output_loads_back() {
    let dir = tempdir().unwrap();
    let raster = raw::decode(&[1, 2, 3, 4, 5, 6], 3, BitDepth::EightBit).unwrap();
    let path = dir.path().join("image.PGM");
    save_image(&raster, &path).unwrap();
    assert!(fs::read(&path).unwrap().starts_with(b"P5\n3 2\n255\n"));
    assert_eq!(load_image(&path).unwrap(), raster);
}

#[test]
fn failures_become_notifications() {
    init_logging();
    let dir = tempdir().unwrap();
    let zeros = write(dir.path(), "zeros.bin", &[0; 32]);
    let missing = dir.path().join("missing.bin");

    let mut session = EditorSession::default();
    session.dispatch(Event::OpenFile(missing));
    assert!(matches!(
        session.dispatch(Event::Process),
        Response::Notify(Notification::Error(msg)) if msg.starts_with("I/O error")
    ));

    session.dispatch(Event::OpenFile(zeros));
    assert!(matches!(
        session.handle(Event::Process),
        Err(Error::EmptyRaster { pixels: 0, .. })
    ));
    assert!(matches!(
        session.handle(Event::SaveImage(dir.path().join("none.png"))),
        Err(Error::FileNotSelected)
    ));
}

#[test]
fn strict_mode_rejects_other_suffixes() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "dump.rom", &[1, 2, 3]);
    let mut session = EditorSession::new(Options {
        strict_extension: true,
        ..Default::default()
    });
    assert!(matches!(
        session.handle(Event::OpenFile(input)),
        Err(Error::UnsupportedExtension(_))
    ));
    assert!(matches!(
        session.handle(Event::Process),
        Err(Error::FileNotSelected)
    ));
}

#[test]
fn zoomed_view_is_saved_with_crisp_pixels() {
    init_logging();
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "dump.bin", &[0b1000_0000]);

    let mut session = EditorSession::new(Options {
        width: 2,
        ..Default::default()
    });
    session.handle(Event::OpenFile(input)).unwrap();
    session.handle(Event::Process).unwrap();
    // 1.25^4 rounds the 2x4 raster to 5x10
    assert_eq!(session.handle(Event::Scroll(4)).unwrap(), Outcome::Redraw);

    let path = dir.path().join("view/zoomed.png");
    assert_eq!(
        session.handle(Event::SaveView(path.clone())).unwrap(),
        Outcome::Saved(path.clone())
    );
    let view = load_image(&path).unwrap();
    assert_eq!((view.width(), view.height()), (5, 10));
    assert_eq!(view.get(0, 0), Some(255));
    assert_eq!(view.get(2, 2), Some(255));
    assert_eq!(view.get(3, 0), Some(0));
    assert_eq!(view.get(0, 3), Some(0));
}
