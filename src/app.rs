//! Application controller: one state struct, one `update` function.
//!
//! User input and completed network calls both arrive as [`Action`]s. An
//! action mutates the state it owns and may ask for one side effect, returned
//! as an [`Effect`] for the [`Runtime`](crate::runtime::Runtime) to perform.
//! Completions only touch their own slice of state, so overlapping calls can
//! finish in any order.

use crate::editor::{Color, DrawMode, Editor};
use crate::gallery::{Artwork, Gallery};
use crate::rendering::DEFAULT_SCALE;
use crate::Result;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Action {
    /// Startup: load the gallery once before any input
    Init,
    SetWidth(u32),
    SetHeight(u32),
    Resize { width: u32, height: u32 },
    SetColor(Color),
    SetMode(DrawMode),
    PointerDown { x: u32, y: u32 },
    PointerEnter { x: u32, y: u32, buttons: u8 },
    Clear,
    Download,
    Refresh,
    Save,
    Delete(i64),

    GalleryLoaded(Result<Vec<Artwork>>),
    Saved(Result<Artwork>),
    Deleted(i64, Result<()>),
    Downloaded(Result<PathBuf>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchGallery,
    Upload { data_url: String, width: u32, height: u32 },
    Remove(i64),
    WriteDownload { filename: String, png: Vec<u8> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message meant for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct App {
    pub editor: Editor,
    pub gallery: Gallery,
    notices: Vec<Notice>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending notices, oldest first
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn info(&mut self, text: impl Into<String>) {
        self.notices.push(Notice { level: NoticeLevel::Info, text: text.into() });
    }

    fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::warn!("{}", text);
        self.notices.push(Notice { level: NoticeLevel::Error, text });
    }

    pub fn update(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::SetWidth(w) => self.editor.set_width(w),
            Action::SetHeight(h) => self.editor.set_height(h),
            Action::Resize { width, height } => self.editor.resize(width, height),
            Action::SetColor(c) => self.editor.set_color(c),
            Action::SetMode(m) => self.editor.set_mode(m),
            Action::PointerDown { x, y } => {
                self.editor.pointer_down(x, y);
            }
            Action::PointerEnter { x, y, buttons } => {
                self.editor.pointer_enter(x, y, buttons);
            }
            Action::Clear => self.editor.clear(),

            Action::Download => match self.editor.rasterize(DEFAULT_SCALE) {
                Ok(raster) => {
                    return Some(Effect::WriteDownload {
                        filename: self.editor.download_filename(),
                        png: raster.png_data,
                    })
                }
                Err(e) => self.error(format!("Download failed: {}", e)),
            },
            Action::Downloaded(Ok(path)) => self.info(format!("Downloaded {}", path.display())),
            Action::Downloaded(Err(e)) => self.error(format!("Download failed: {}", e)),

            Action::Init | Action::Refresh => {
                if self.gallery.loading {
                    log::debug!("refresh ignored, already loading");
                    return None;
                }
                self.gallery.loading = true;
                return Some(Effect::FetchGallery);
            }
            Action::GalleryLoaded(res) => {
                self.gallery.loading = false;
                match res {
                    Ok(items) => self.gallery.replace(items),
                    Err(e) => {
                        self.gallery.replace(Vec::new());
                        self.error(format!("Failed to load gallery: {}", e));
                    }
                }
            }

            Action::Save => {
                if self.gallery.saving {
                    log::debug!("save ignored, already saving");
                    return None;
                }
                match self.editor.rasterize(DEFAULT_SCALE) {
                    Ok(raster) => {
                        self.gallery.saving = true;
                        return Some(Effect::Upload {
                            data_url: raster.to_data_url(),
                            width: self.editor.width(),
                            height: self.editor.height(),
                        });
                    }
                    Err(e) => self.error(format!("Save failed: {}", e)),
                }
            }
            Action::Saved(res) => {
                self.gallery.saving = false;
                match res {
                    Ok(art) => {
                        self.gallery.prepend(art);
                        self.info("Artwork saved!");
                    }
                    Err(e) => self.error(format!("Save failed: {}", e)),
                }
            }

            Action::Delete(id) => return Some(Effect::Remove(id)),
            Action::Deleted(id, Ok(())) => {
                self.gallery.remove(id);
            }
            Action::Deleted(_, Err(e)) => self.error(format!("Delete failed: {}", e)),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn art(id: i64) -> Artwork {
        Artwork {
            id,
            filename: format!("art_{id}.png"),
            width: 16,
            height: 16,
            created_at: String::new(),
            url: format!("http://host/api/art/{id}"),
        }
    }

    #[test]
    fn save_emits_upload_and_completion_prepends() {
        let mut app = App::new();
        app.update(Action::PointerDown { x: 0, y: 0 });
        let effect = app.update(Action::Save);
        match effect {
            Some(Effect::Upload { data_url, width, height }) => {
                assert!(data_url.starts_with("data:image/png;base64,"));
                assert_eq!((width, height), (16, 16));
            }
            other => panic!("unexpected effect {:?}", other),
        }
        assert!(app.gallery.saving);
        assert_eq!(app.update(Action::Save), None);

        app.gallery.replace(vec![art(1)]);
        app.update(Action::Saved(Ok(art(2))));
        assert!(!app.gallery.saving);
        assert_eq!(app.gallery.items()[0].id, 2);
        assert_eq!(app.take_notices()[0].text, "Artwork saved!");
    }

    #[test]
    fn failed_save_adds_nothing() {
        let mut app = App::new();
        app.update(Action::Save);
        app.update(Action::Saved(Err(Error::RequestFailed { status: 400, message: "too large".into() })));
        assert!(app.gallery.is_empty());
        assert!(!app.gallery.saving);
        let n = app.take_notices();
        assert_eq!(n[0].level, NoticeLevel::Error);
        assert_eq!(n[0].text, "Save failed: too large");
    }

    #[test]
    fn init_loads_gallery_once() {
        let mut app = App::new();
        assert_eq!(app.update(Action::Init), Some(Effect::FetchGallery));
        assert!(app.gallery.loading);
        assert_eq!(app.update(Action::Refresh), None);
        app.update(Action::GalleryLoaded(Ok(vec![art(2), art(1)])));
        assert_eq!(app.gallery.items().len(), 2);
        assert!(app.notices().is_empty());
    }

    #[test]
    fn failed_load_leaves_empty_gallery() {
        let mut app = App::new();
        app.gallery.replace(vec![art(1)]);
        assert_eq!(app.update(Action::Refresh), Some(Effect::FetchGallery));
        assert!(app.gallery.loading);
        app.update(Action::GalleryLoaded(Err(Error::Transport("refused".into()))));
        assert!(app.gallery.is_empty());
        assert!(!app.gallery.loading);
        assert!(app.notices()[0].text.starts_with("Failed to load gallery"));
    }

    #[test]
    fn delete_completion_removes_only_that_id() {
        let mut app = App::new();
        app.gallery.replace(vec![art(3), art(2), art(1)]);
        assert_eq!(app.update(Action::Delete(2)), Some(Effect::Remove(2)));
        // a list refresh finishing first does not matter
        app.update(Action::GalleryLoaded(Ok(vec![art(4), art(3), art(2), art(1)])));
        app.update(Action::Deleted(2, Ok(())));
        let ids: Vec<_> = app.gallery.items().iter().map(|a| a.id).collect();
        assert_eq!(ids, [4, 3, 1]);
    }

    #[test]
    fn failed_delete_keeps_list() {
        let mut app = App::new();
        app.gallery.replace(vec![art(1)]);
        app.update(Action::Deleted(1, Err(Error::RequestFailed { status: 404, message: "Artwork not found".into() })));
        assert_eq!(app.gallery.items().len(), 1);
        assert_eq!(app.notices()[0].text, "Delete failed: Artwork not found");
    }

    #[test]
    fn download_names_file_after_dimensions() {
        let mut app = App::new();
        app.update(Action::Resize { width: 8, height: 4 });
        match app.update(Action::Download) {
            Some(Effect::WriteDownload { filename, png }) => {
                assert_eq!(filename, "pixel-8x4.png");
                assert_eq!(&png[1..4], b"PNG");
            }
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn erase_mode_through_actions() {
        let mut app = App::new();
        app.update(Action::PointerDown { x: 2, y: 2 });
        app.update(Action::SetMode(DrawMode::Erase));
        app.update(Action::PointerEnter { x: 2, y: 2, buttons: 1 });
        assert!(app.editor.grid().is_empty());
    }
}
