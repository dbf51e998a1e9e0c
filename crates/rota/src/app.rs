use crate::config;
use crate::events::AppEvent;
use crate::session::{Session, SpinStarted};
use async_channel::{Receiver, Sender};
use spindle::protocol::{Reply, Request};
use std::time::Instant;

/// The event loop. Every state change happens in [`App::update`], one event at a time.
pub struct App {
    session: Session,
    tx: Sender<AppEvent>,
    /// Client waiting for the winner of the spin in flight.
    waiting: Option<Sender<Reply>>,
}

impl App {
    pub fn new(session: Session, tx: Sender<AppEvent>) -> Self {
        Self {
            session,
            tx,
            waiting: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn run(mut self, rx: Receiver<AppEvent>) {
        while let Ok(event) = rx.recv().await {
            self.update(event);
        }
    }

    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Request { request, reply } => {
                if let Some(answer) = self.handle(request, &reply) {
                    let _ = reply.try_send(answer);
                }
            }
            AppEvent::SpinFinished(serial) => self.finish_spin(serial),
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.session.reload(new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }

    /// Returns `None` when the answer is deferred until the spin finishes.
    fn handle(&mut self, request: Request, reply: &Sender<Reply>) -> Option<Reply> {
        log::debug!("Handling {:?}", request);
        let result = match request {
            Request::Add { text } => self.session.add(&text),
            Request::Remove { label } => self.session.remove(&label),
            Request::Edit { label, text } => self.session.edit(&label, &text),
            Request::Clear => self.session.clear(),
            Request::Reset => self.session.reset(),
            Request::Show => Ok(()),
            Request::Spin { wait } => return self.start_spin(wait, reply),
        };

        Some(match result {
            Ok(()) => Reply::Ok {
                snapshot: self.session.snapshot(Instant::now()),
            },
            Err(e) => {
                log::debug!("Rejected: {}", e);
                e.into()
            }
        })
    }

    fn start_spin(&mut self, wait: bool, reply: &Sender<Reply>) -> Option<Reply> {
        let now = Instant::now();
        let started = match self.session.spin(now) {
            Ok(s) => s,
            Err(e) => return Some(e.into()),
        };
        self.schedule_finish(started);

        if wait {
            self.waiting = Some(reply.clone());
            return None;
        }
        Some(Reply::Spinning {
            target: started.spin.rotation,
            duration_ms: u64::try_from(started.duration.as_millis()).unwrap_or(u64::MAX),
            snapshot: self.session.snapshot(now),
        })
    }

    fn schedule_finish(&self, started: SpinStarted) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(started.duration).await;
            let _ = tx.send(AppEvent::SpinFinished(started.serial)).await;
        });
    }

    fn finish_spin(&mut self, serial: u64) {
        match self.session.finish_spin(serial) {
            Ok(winner) => {
                log::info!("Winner: {}", winner);
                if let Some(client) = self.waiting.take() {
                    let _ = client.try_send(Reply::Winner {
                        label: winner,
                        rotation: self.session.wheel().rotation(),
                    });
                }
            }
            Err(e) => log::error!("Failed to finish spin {}: {}", serial, e),
        }
    }
}
