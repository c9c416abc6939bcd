use log::{info, warn};

use crate::{api::PostApi, auth::AuthContext, error::Result, post::Post};

use super::{upload::UploadForm, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    /// The post is not in the feed or belongs to someone else.
    Refused,
    Failed,
}

/// The authenticated home page: loads the feed once on mount and reloads it
/// after every successful change.
pub struct FeedPage<'a, A, N> {
    api: &'a A,
    notifier: &'a N,
    posts: Vec<Post>,
    loading: bool,
    mounted: bool,
}

impl<'a, A: PostApi, N: Notifier> FeedPage<'a, A, N> {
    pub fn new(api: &'a A, notifier: &'a N) -> Self {
        Self {
            api,
            notifier,
            posts: Vec::new(),
            loading: true,
            mounted: false,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Performs the initial load. Only the first call does anything.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.load_feed().await;
    }

    pub async fn load_feed(&mut self) {
        match self.api.get_feed().await {
            Ok(posts) => {
                info!("{} posts", posts.len());
                self.posts = posts;
            }
            Err(e) => {
                warn!("Feed request failed: {}", e);
                self.notifier.alert(&format!("Error loading feed: {}", e));
            }
        }
        self.loading = false;
    }

    /// Only posts listed in the loaded feed as the user's own can be deleted.
    pub async fn handle_delete(&mut self, post_id: &str) -> DeleteOutcome {
        match self.posts.iter().find(|post| post.id == post_id) {
            Some(post) if post.is_owner => {}
            Some(_) => {
                self.notifier
                    .alert(&format!("Post {} belongs to someone else", post_id));
                return DeleteOutcome::Refused;
            }
            None => {
                self.notifier
                    .alert(&format!("Post {} is not in your feed", post_id));
                return DeleteOutcome::Refused;
            }
        }

        if !self.notifier.confirm("Are you sure you want to delete this post?") {
            info!("Delete cancelled");
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_post(post_id).await {
            Ok(_) => {
                info!("Deleted post {}", post_id);
                self.load_feed().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                self.notifier.alert(&format!("Error deleting post: {}", e));
                DeleteOutcome::Failed
            }
        }
    }

    /// Submit the embedded upload form and refresh the feed once it lands.
    pub async fn submit_upload(&mut self, form: &mut UploadForm) -> bool {
        let uploaded = form.submit(self.api, self.notifier).await;
        if uploaded {
            self.load_feed().await;
        }
        uploaded
    }

    pub fn logout(&self, context: &mut AuthContext) -> Result<()> {
        context.logout()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        auth::SessionStore,
        media::MediaFile,
        pages::{
            testing::{FakeApi, RecordingNotifier},
            upload::PreviewRegistry,
        },
        post::tests::sample_post,
    };

    #[tokio::test]
    async fn mount_loads_exactly_once() {
        let api = FakeApi::with_posts(vec![sample_post("a", true)]);
        let notifier = RecordingNotifier::answering(true);
        let mut page = FeedPage::new(&api, &notifier);
        assert!(page.is_loading());

        page.mount().await;
        page.mount().await;
        assert_eq!(api.feed_calls.get(), 1);
        assert!(!page.is_loading());
        assert_eq!(page.posts().len(), 1);
    }

    #[tokio::test]
    async fn failed_load_alerts_and_stops_loading() {
        let api = FakeApi::with_posts(vec![sample_post("a", true)]);
        api.fail_feed.set(true);
        let notifier = RecordingNotifier::answering(true);
        let mut page = FeedPage::new(&api, &notifier);

        page.mount().await;
        assert!(!page.is_loading());
        assert!(page.posts().is_empty());
        assert_eq!(notifier.alert_count(), 1);
    }

    #[tokio::test]
    async fn successful_delete_reloads_once() {
        let api = FakeApi::with_posts(vec![sample_post("a", true), sample_post("b", false)]);
        let notifier = RecordingNotifier::answering(true);
        let mut page = FeedPage::new(&api, &notifier);
        page.mount().await;

        assert_eq!(page.handle_delete("a").await, DeleteOutcome::Deleted);
        assert_eq!(api.delete_calls.get(), 1);
        assert_eq!(api.feed_calls.get(), 2);
        assert_eq!(page.posts().len(), 1);
        assert_eq!(page.posts()[0].id, "b");
    }

    #[tokio::test]
    async fn failed_delete_does_not_reload() {
        let api = FakeApi::with_posts(vec![sample_post("a", true)]);
        api.fail_delete.set(true);
        let notifier = RecordingNotifier::answering(true);
        let mut page = FeedPage::new(&api, &notifier);
        page.mount().await;

        assert_eq!(page.handle_delete("a").await, DeleteOutcome::Failed);
        assert_eq!(api.feed_calls.get(), 1);
        assert_eq!(notifier.alert_count(), 1);
        assert_eq!(page.posts().len(), 1);
    }

    #[tokio::test]
    async fn declined_delete_touches_nothing() {
        let api = FakeApi::with_posts(vec![sample_post("a", true)]);
        let notifier = RecordingNotifier::answering(false);
        let mut page = FeedPage::new(&api, &notifier);
        page.mount().await;

        assert_eq!(page.handle_delete("a").await, DeleteOutcome::Cancelled);
        assert_eq!(notifier.questions.get(), 1);
        assert_eq!(api.delete_calls.get(), 0);
        assert_eq!(api.feed_calls.get(), 1);
    }

    #[tokio::test]
    async fn delete_refuses_posts_of_other_authors() {
        let api = FakeApi::with_posts(vec![sample_post("theirs", false)]);
        let notifier = RecordingNotifier::answering(true);
        let mut page = FeedPage::new(&api, &notifier);
        page.mount().await;

        assert_eq!(page.handle_delete("theirs").await, DeleteOutcome::Refused);
        assert_eq!(notifier.questions.get(), 0);
        assert_eq!(notifier.alert_count(), 1);
        assert_eq!(api.delete_calls.get(), 0);
        assert_eq!(api.feed_calls.get(), 1);
        assert_eq!(page.posts().len(), 1);
    }

    #[tokio::test]
    async fn delete_refuses_unknown_posts() {
        let api = FakeApi::with_posts(vec![sample_post("mine", true)]);
        let notifier = RecordingNotifier::answering(true);
        let mut page = FeedPage::new(&api, &notifier);
        page.mount().await;

        assert_eq!(page.handle_delete("not-in-feed").await, DeleteOutcome::Refused);
        assert_eq!(notifier.questions.get(), 0);
        assert_eq!(
            notifier.alerts.borrow().as_slice(),
            ["Post not-in-feed is not in your feed".to_string()]
        );
        assert_eq!(api.delete_calls.get(), 0);
    }

    #[tokio::test]
    async fn upload_refreshes_feed() {
        let api = FakeApi::default();
        let notifier = RecordingNotifier::answering(true);
        let mut page = FeedPage::new(&api, &notifier);
        page.mount().await;
        assert!(page.posts().is_empty());

        let mut form = UploadForm::new(PreviewRegistry::default());
        form.pick(Some(MediaFile::new("beach.jpg", 10)));
        assert!(page.submit_upload(&mut form).await);
        assert_eq!(api.feed_calls.get(), 2);
        assert_eq!(page.posts()[0].id, "uploaded");
    }

    #[tokio::test]
    async fn failed_upload_skips_reload() {
        let api = FakeApi::default();
        api.fail_upload.set(true);
        let notifier = RecordingNotifier::answering(true);
        let mut page = FeedPage::new(&api, &notifier);
        page.mount().await;

        let mut form = UploadForm::new(PreviewRegistry::default());
        form.pick(Some(MediaFile::new("beach.jpg", 10)));
        assert!(!page.submit_upload(&mut form).await);
        assert_eq!(api.feed_calls.get(), 1);
    }

    #[test]
    fn logout_clears_session() {
        let dir = TempDir::new().unwrap();
        let mut context =
            AuthContext::restore(SessionStore::new(dir.path().join("s.json")), None).unwrap();
        context.login("tok".into()).unwrap();

        let api = FakeApi::default();
        let notifier = RecordingNotifier::answering(true);
        let page = FeedPage::new(&api, &notifier);
        page.logout(&mut context).unwrap();
        assert!(!context.session().is_authenticated());
    }
}
