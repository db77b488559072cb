//! Effect runner for the [`App`] controller.
//!
//! Every effect runs on its own worker thread and reports back with a
//! completion [`Action`] over a channel. Nothing is queued behind anything
//! else and nothing is cancelled; the driver feeds completions back into
//! `App::update` as they arrive.

use crate::app::{Action, App, Effect};
use crate::gallery::GalleryClient;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

pub struct Runtime {
    client: GalleryClient,
    downloads: PathBuf,
    tx: Sender<Action>,
    rx: Receiver<Action>,
    in_flight: usize,
}

impl Runtime {
    /// `downloads` is where `WriteDownload` effects land
    pub fn new(client: GalleryClient, downloads: impl Into<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            downloads: downloads.into(),
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start an effect in the background
    pub fn perform(&mut self, effect: Effect) {
        let tx = self.tx.clone();
        let client = self.client.clone();
        let downloads = self.downloads.clone();
        self.in_flight += 1;

        thread::spawn(move || {
            let done = match effect {
                Effect::FetchGallery => Action::GalleryLoaded(client.list()),
                Effect::Upload { data_url, width, height } => {
                    Action::Saved(client.save(&data_url, width, height))
                }
                Effect::Remove(id) => Action::Deleted(id, client.delete(id)),
                Effect::WriteDownload { filename, png } => {
                    let path = downloads.join(filename);
                    let res = std::fs::write(&path, png).map(|_| path).map_err(Into::into);
                    Action::Downloaded(res)
                }
            };
            // Receiver gone means the runtime was dropped; nothing to report to.
            let _ = tx.send(done);
        });
    }

    /// Apply `action` and start whatever effect it asks for
    pub fn dispatch(&mut self, app: &mut App, action: Action) {
        if let Some(effect) = app.update(action) {
            log::debug!("effect: {}", effect_name(&effect));
            self.perform(effect);
        }
    }

    /// Block for the next completion and apply it. Returns `false` when
    /// nothing is in flight.
    pub fn step(&mut self, app: &mut App) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.rx.recv() {
            Ok(done) => {
                self.in_flight -= 1;
                self.dispatch(app, done);
                true
            }
            Err(_) => false,
        }
    }

    /// Drive completions until no effect is outstanding
    pub fn run_until_idle(&mut self, app: &mut App) {
        while self.step(app) {}
    }
}

fn effect_name(effect: &Effect) -> &'static str {
    match effect {
        Effect::FetchGallery => "fetch gallery",
        Effect::Upload { .. } => "upload",
        Effect::Remove(_) => "remove",
        Effect::WriteDownload { .. } => "write download",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;

    #[test]
    fn download_effect_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let client = GalleryClient::new(ClientConfig::default()).unwrap();
        let mut rt = Runtime::new(client, dir.path());
        let mut app = App::new();
        rt.dispatch(&mut app, Action::Resize { width: 4, height: 4 });
        rt.dispatch(&mut app, Action::Download);
        assert_eq!(rt.in_flight(), 1);
        rt.run_until_idle(&mut app);
        assert!(dir.path().join("pixel-4x4.png").exists());
        assert!(app.notices()[0].text.starts_with("Downloaded"));
    }

    #[test]
    fn unreachable_store_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let client = GalleryClient::new(ClientConfig {
            base_url: format!("http://127.0.0.1:{}", port),
            timeout_ms: 2000,
            ..Default::default()
        })
        .unwrap();
        let mut rt = Runtime::new(client, dir.path());
        let mut app = App::new();
        rt.dispatch(&mut app, Action::Refresh);
        rt.run_until_idle(&mut app);
        assert!(app.gallery.is_empty());
        assert!(!app.gallery.loading);
        assert!(app.notices()[0].text.starts_with("Failed to load gallery"));
    }
}
