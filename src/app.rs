use std::path::PathBuf;

use chrono::{Local, Utc};
use log::{info, warn};

use crate::{
    api::FeedClient,
    auth::{AuthContext, SessionStore},
    config::{Command, Config},
    error::{Error, Result},
    media::MediaFile,
    pages::{
        feed::{DeleteOutcome, FeedPage},
        upload::{DragEvent, PreviewRegistry, UploadForm, CAPTION_LIMIT},
        ConsoleNotifier, Notifier,
    },
    router::{self, Route},
    view,
};

pub struct App {
    config: Config,
    context: AuthContext,
    notifier: ConsoleNotifier,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let store = SessionStore::new(config.session_file());
        let context = AuthContext::restore(store, config.token())?;
        let notifier = ConsoleNotifier::new(config.assume_yes());
        Ok(Self {
            config,
            context,
            notifier,
        })
    }

    /// Run the configured command. `Ok(false)` means the command was handled
    /// but did not succeed (the user has already been told why).
    pub async fn run(&mut self) -> Result<bool> {
        let command = self.config.command().clone();
        if command == Command::Logout {
            let client = self.client()?;
            FeedPage::new(&client, &self.notifier).logout(&mut self.context)?;
            return Ok(true);
        }

        match router::navigate(command.path(), self.context.session()) {
            Route::Login => match command {
                Command::Login { email, password } => self.login(&email, &password).await,
                _ => Err(Error::LoginRequired),
            },
            Route::Register => match command {
                Command::Register { email, password } => self.register(&email, &password).await,
                _ => Err(Error::LoginRequired),
            },
            Route::Feed => {
                if matches!(command, Command::Login { .. } | Command::Register { .. }) {
                    info!("Already logged in");
                }
                self.feed(command).await
            }
        }
    }

    fn client(&self) -> Result<FeedClient> {
        FeedClient::from_config(&self.config, self.context.session())
    }

    async fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        match self.client()?.login(email, password).await {
            Ok(token) => {
                self.context.login(token)?;
                self.feed(Command::Feed).await
            }
            Err(e) => {
                self.notifier.alert(&format!("Login failed: {}", e));
                Ok(false)
            }
        }
    }

    async fn register(&self, email: &str, password: &str) -> Result<bool> {
        match self.client()?.register(email, password).await {
            Ok(user) => {
                info!("Registered {}, log in to start posting", user.email);
                Ok(true)
            }
            Err(e) => {
                self.notifier.alert(&format!("Registration failed: {}", e));
                Ok(false)
            }
        }
    }

    async fn feed(&self, command: Command) -> Result<bool> {
        let client = self.client()?;
        let mut page = FeedPage::new(&client, &self.notifier);
        page.mount().await;

        let succeeded = match command {
            Command::Upload { files, caption } => {
                let mut form = UploadForm::new(PreviewRegistry::default());
                if self.select(&mut form, &files).await? {
                    if caption.chars().count() > CAPTION_LIMIT {
                        warn!("Caption cut to {} characters", CAPTION_LIMIT);
                    }
                    form.set_caption(&caption);
                    print!("{}", view::upload_form(&form));
                    page.submit_upload(&mut form).await
                } else {
                    false
                }
            }
            Command::Delete { id } => matches!(
                page.handle_delete(&id).await,
                DeleteOutcome::Deleted | DeleteOutcome::Cancelled
            ),
            _ => true,
        };

        print!(
            "{}",
            view::feed(
                self.context.session(),
                page.is_loading(),
                page.posts(),
                &Utc::now(),
                &Local
            )
        );
        Ok(succeeded)
    }

    /// One file goes through the picker, several arrive as a drop.
    async fn select(&self, form: &mut UploadForm, files: &[PathBuf]) -> Result<bool> {
        let Some(first) = files.first() else {
            self.notifier.alert("Select a file first");
            return Ok(false);
        };

        let accepted = if let [path] = files {
            form.pick(Some(MediaFile::open(path).await?))
        } else {
            form.drag(DragEvent::Enter);
            let mut dropped = Vec::with_capacity(files.len());
            for path in files {
                match MediaFile::open(path).await {
                    Ok(file) => {
                        form.drag(DragEvent::Over);
                        dropped.push(file);
                    }
                    Err(e) => {
                        form.drag(DragEvent::Leave);
                        return Err(e);
                    }
                }
            }
            warn!("{} files given, only {} is used", files.len(), first.display());
            form.drop_files(dropped)
        };

        if !accepted {
            self.notifier
                .alert(&format!("{} is not an image or video", first.display()));
        }
        Ok(accepted)
    }
}
