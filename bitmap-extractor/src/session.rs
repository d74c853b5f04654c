use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::{debug, info, warn};

use crate::{
    config::{parse_width, Options},
    error::{Error, Result},
    mode::BitDepth,
    png::save_image,
    raster::{ensure_parent_dir, ImageDecoder, ImageEncoder, Raster},
    raw::{RawDecoder, RawEncoder},
    source::{check_extension, read_source},
    view::View,
};

/// Input delivered to the editor by the surrounding interface.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A source file was picked
    OpenFile(PathBuf),
    /// The width field changed
    SetWidth(String),
    /// The mode selector changed
    SetMode(String),
    /// Decode the opened file with the current options
    Process,
    /// Pointer click in view coordinates
    Click {
        /// Horizontal view position
        x: f32,
        /// Vertical view position
        y: f32,
    },
    /// Scroll wheel steps, positive to zoom in
    Scroll(i32),
    /// Save the raster as an image
    SaveImage(PathBuf),
    /// Save the raster re-encoded as a raw binary file
    SaveBin(PathBuf),
    /// Save the view as drawn at the current zoom, as PNG
    SaveView(PathBuf),
    /// A file dialog was dismissed without choosing a path
    CancelDialog,
}

/// What the interface should do after an event was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The raster or the zoom changed and the view must be drawn again
    Redraw,
    /// Nothing visible changed
    Unchanged,
    /// A file was written
    Saved(PathBuf),
}

/// Message shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// The event failed
    Error(String),
}

/// Result of [`EditorSession::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The event was handled
    Done(Outcome),
    /// The event failed and the user must be told
    Notify(Notification),
}

type Handler = fn(&mut EditorSession, Event) -> Result<Outcome>;

/// State of one editing session: the picked file, the options and the decoded raster.
#[derive(Debug, Default)]
pub struct EditorSession {
    file_path: Option<PathBuf>,
    options: Options,
    raster: Option<Raster>,
    view: View,
}

impl EditorSession {
    /// Starts a session with the given options and nothing opened.
    pub fn new(options: Options) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// The picked source file, if any
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The decoded raster, if a file has been processed
    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    /// Current view state
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Handles an event and turns any failure into a user notification.
    pub fn dispatch(&mut self, event: Event) -> Response {
        match self.handle(event) {
            Ok(outcome) => Response::Done(outcome),
            Err(err) => {
                warn!("{err}");
                Response::Notify(Notification::Error(err.to_string()))
            }
        }
    }

    /// Routes an event to its handler.
    pub fn handle(&mut self, event: Event) -> Result<Outcome> {
        debug!("Handling {event:?}");
        let handler: Handler = match event {
            Event::OpenFile(_) => Self::on_open_file,
            Event::SetWidth(_) => Self::on_set_width,
            Event::SetMode(_) => Self::on_set_mode,
            Event::Process => Self::on_process,
            Event::Click { .. } => Self::on_click,
            Event::Scroll(_) => Self::on_scroll,
            Event::SaveImage(_) => Self::on_save_image,
            Event::SaveBin(_) => Self::on_save_bin,
            Event::SaveView(_) => Self::on_save_view,
            Event::CancelDialog => Self::on_cancel,
        };
        handler(self, event)
    }

    fn on_open_file(&mut self, event: Event) -> Result<Outcome> {
        let Event::OpenFile(path) = event else {
            return Err(Error::InternalError("Open handler received another event"));
        };
        if self.options.strict_extension {
            check_extension(&path)?;
        }
        info!("Selected file: {}", path.display());
        self.file_path = Some(path);
        let had_raster = self.raster.take().is_some();
        Ok(if had_raster {
            Outcome::Redraw
        } else {
            Outcome::Unchanged
        })
    }

    fn on_set_width(&mut self, event: Event) -> Result<Outcome> {
        let Event::SetWidth(text) = event else {
            return Err(Error::InternalError("Width handler received another event"));
        };
        self.options.width = parse_width(&text)?;
        Ok(Outcome::Unchanged)
    }

    fn on_set_mode(&mut self, event: Event) -> Result<Outcome> {
        let Event::SetMode(text) = event else {
            return Err(Error::InternalError("Mode handler received another event"));
        };
        self.options.mode = text.parse::<BitDepth>()?;
        Ok(Outcome::Unchanged)
    }

    fn on_process(&mut self, _event: Event) -> Result<Outcome> {
        let path = self.file_path.as_ref().ok_or(Error::FileNotSelected)?;
        let data = read_source(path, self.options.strict_extension)?;
        let raster = RawDecoder::new(&data, self.options.width, self.options.mode).decode()?;
        info!(
            "Interpreted {} as a {}x{} {} bitmap",
            path.display(),
            raster.width(),
            raster.height(),
            self.options.mode
        );
        self.raster = Some(raster);
        Ok(Outcome::Redraw)
    }

    fn on_click(&mut self, event: Event) -> Result<Outcome> {
        let Event::Click { x, y } = event else {
            return Err(Error::InternalError("Click handler received another event"));
        };
        let raster = self.raster.as_mut().ok_or(Error::FileNotSelected)?;
        let toggled = self
            .view
            .to_raster(x, y)
            .is_some_and(|(px, py)| raster.toggle(px, py));
        Ok(if toggled {
            Outcome::Redraw
        } else {
            Outcome::Unchanged
        })
    }

    fn on_scroll(&mut self, event: Event) -> Result<Outcome> {
        let Event::Scroll(steps) = event else {
            return Err(Error::InternalError("Scroll handler received another event"));
        };
        let before = self.view.zoom();
        self.view.scroll(steps);
        Ok(if self.view.zoom() != before {
            Outcome::Redraw
        } else {
            Outcome::Unchanged
        })
    }

    fn on_save_image(&mut self, event: Event) -> Result<Outcome> {
        let Event::SaveImage(path) = event else {
            return Err(Error::InternalError("Save handler received another event"));
        };
        let raster = self.raster.as_ref().ok_or(Error::FileNotSelected)?;
        save_image(raster, &path)?;
        Ok(Outcome::Saved(path))
    }

    fn on_save_bin(&mut self, event: Event) -> Result<Outcome> {
        let Event::SaveBin(path) = event else {
            return Err(Error::InternalError("Save handler received another event"));
        };
        let raster = self.raster.as_ref().ok_or(Error::FileNotSelected)?;
        RawEncoder::new(raster, self.options.mode).encode_to_file(&path)?;
        Ok(Outcome::Saved(path))
    }

    fn on_save_view(&mut self, event: Event) -> Result<Outcome> {
        let Event::SaveView(path) = event else {
            return Err(Error::InternalError("Save handler received another event"));
        };
        let raster = self.raster.as_ref().ok_or(Error::FileNotSelected)?;
        let rendered = self.view.render(raster)?;
        ensure_parent_dir(&path)?;
        rendered.save_with_format(&path, ImageFormat::Png)?;
        info!(
            "Wrote {}x{} view at zoom {} to {}",
            rendered.width(),
            rendered.height(),
            self.view.zoom(),
            path.display()
        );
        Ok(Outcome::Saved(path))
    }

    fn on_cancel(&mut self, _event: Event) -> Result<Outcome> {
        debug!("Dialog cancelled");
        Ok(Outcome::Unchanged)
    }
}

#[cfg(test)]
fn session_with(raster: Raster) -> EditorSession {
    EditorSession {
        raster: Some(raster),
        ..Default::default()
    }
}

#[test]
fn process_requires_a_file() {
    let mut session = EditorSession::default();
    assert!(matches!(
        session.handle(Event::Process),
        Err(Error::FileNotSelected)
    ));
    assert_eq!(
        session.dispatch(Event::Process),
        Response::Notify(Notification::Error("Please select a file!".to_string()))
    );
}

#[test]
fn options_are_validated() {
    let mut session = EditorSession::default();
    assert!(matches!(
        session.handle(Event::SetWidth("abc".into())),
        Err(Error::InvalidWidth(_))
    ));
    assert!(matches!(
        session.handle(Event::SetMode("2bit".into())),
        Err(Error::UnsupportedMode(_))
    ));
    assert_eq!(session.options(), &Options::default());

    session.handle(Event::SetWidth("32".into())).unwrap();
    session.handle(Event::SetMode("8bit".into())).unwrap();
    assert_eq!(session.options().width, 32);
    assert_eq!(session.options().mode, BitDepth::EightBit);
}

#[test]
fn click_toggles_pixel_under_pointer() {
    let mut session = session_with(Raster::new(2, 2, vec![0, 0, 0, 100]).unwrap());
    session.handle(Event::Scroll(4)).unwrap();
    let zoom = session.view().zoom();

    let outcome = session
        .handle(Event::Click {
            x: 1.5 * zoom,
            y: 1.5 * zoom,
        })
        .unwrap();
    assert_eq!(outcome, Outcome::Redraw);
    assert_eq!(session.raster().unwrap().get(1, 1), Some(155));
}

#[test]
fn click_outside_image_is_ignored() {
    let raster = Raster::new(2, 2, vec![0, 0, 0, 100]).unwrap();
    let mut session = session_with(raster.clone());
    for (x, y) in [(-1.0, 0.0), (2.5, 0.0), (0.0, 40.0)] {
        assert_eq!(
            session.handle(Event::Click { x, y }).unwrap(),
            Outcome::Unchanged
        );
    }
    assert_eq!(session.raster(), Some(&raster));
}

#[test]
fn click_without_raster_is_reported() {
    let mut session = EditorSession::default();
    assert!(matches!(
        session.handle(Event::Click { x: 0.0, y: 0.0 }),
        Err(Error::FileNotSelected)
    ));
}

#[test]
fn view_cannot_be_saved_before_processing() {
    let mut session = EditorSession::default();
    assert!(matches!(
        session.handle(Event::SaveView("view.png".into())),
        Err(Error::FileNotSelected)
    ));
}

#[test]
fn cancel_is_not_an_error() {
    let mut session = EditorSession::default();
    assert_eq!(
        session.dispatch(Event::CancelDialog),
        Response::Done(Outcome::Unchanged)
    );
}

#[test]
fn opening_a_file_discards_the_raster() {
    let mut session = session_with(Raster::new(1, 1, vec![1]).unwrap());
    assert_eq!(
        session.handle(Event::OpenFile("other.bin".into())).unwrap(),
        Outcome::Redraw
    );
    assert!(session.raster().is_none());
    assert_eq!(session.file_path(), Some(Path::new("other.bin")));
}

#[test]
fn strict_sessions_reject_other_extensions() {
    let mut session = EditorSession::new(Options {
        strict_extension: true,
        ..Default::default()
    });
    assert!(matches!(
        session.handle(Event::OpenFile("dump.img".into())),
        Err(Error::UnsupportedExtension(_))
    ));
    assert!(session.file_path().is_none());
}
