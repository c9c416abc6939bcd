//! Plain-text rendering of the pages.

use std::fmt::{Display, Write};

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    auth::Session,
    pages::upload::UploadForm,
    post::Post,
};

const APP_NAME: &str = "InstaFeed";
const RULE: &str = "+--------------------------------------------------------";

pub fn header(session: &Session) -> String {
    let status = if session.is_authenticated() {
        "[✓] Connected"
    } else {
        "[?] Disconnected"
    };
    format!("== {} ==  {}\n", APP_NAME, status)
}

pub fn footer() -> String {
    format!("\n© 2026 {}.\nAn app for sharing moments.\n", APP_NAME)
}

pub fn loading() -> String {
    "Loading posts...\n".to_string()
}

pub fn empty_state() -> String {
    "\n  No posts yet\n  Be the first to share something\n".to_string()
}

pub fn short_date<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    date.with_timezone(tz).format("%-d %b").to_string()
}

pub fn full_date<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    date.with_timezone(tz)
        .format("%-d %B %Y, %H:%M")
        .to_string()
}

/// Recent posts get a relative age, older ones a short date.
pub fn relative_date<Tz: TimeZone>(date: &DateTime<Utc>, now: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let age = now.signed_duration_since(*date);
    if age.num_seconds() < 0 {
        return short_date(date, tz);
    }
    match (age.num_minutes(), age.num_hours(), age.num_days()) {
        (0, _, _) => "just now".to_string(),
        (m, 0, _) => format!("{}m ago", m),
        (_, h, 0) => format!("{}h ago", h),
        (_, _, d) if d < 7 => format!("{}d ago", d),
        _ => short_date(date, tz),
    }
}

pub fn post_card<Tz: TimeZone>(post: &Post, now: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);

    let _ = write!(
        out,
        "| ({}) {} · {}",
        post.initial(),
        post.email,
        relative_date(&post.created_at, now, tz)
    );
    if post.is_owner {
        let _ = write!(out, "    [delete {}]", post.id);
    }
    out.push('\n');

    // anything that is not an image plays as a video
    let kind = if post.file_type.is_image() {
        "image"
    } else {
        "video"
    };
    let _ = writeln!(out, "| [{}] {}", kind, post.url);

    // not wired to the server
    let _ = writeln!(out, "| ♡ Like   ◯ Comment   ↗ Share   ⋮");

    if post.caption.is_empty() {
        let _ = writeln!(out, "| {}", post.handle());
    } else {
        let _ = writeln!(out, "| {} {}", post.handle(), post.caption);
    }
    let _ = writeln!(out, "| Published {}", full_date(&post.created_at, tz));
    let _ = writeln!(out, "{}", RULE);
    out
}

pub fn feed<Tz: TimeZone>(
    session: &Session,
    is_loading: bool,
    posts: &[Post],
    now: &DateTime<Utc>,
    tz: &Tz,
) -> String
where
    Tz::Offset: Display,
{
    let mut out = header(session);
    if is_loading {
        out.push_str(&loading());
        return out;
    }

    if posts.is_empty() {
        out.push_str(&empty_state());
    } else {
        for post in posts {
            out.push_str(&post_card(post, now, tz));
        }
    }
    out.push_str(&footer());
    out
}

pub fn upload_form(form: &UploadForm) -> String {
    let mut out = String::new();
    match (form.file(), form.preview()) {
        (Some(file), preview) => {
            let kind = if file.is_video() { "video" } else { "image" };
            let _ = writeln!(
                out,
                "[{}] {} ({} KB) {}",
                kind,
                file.name,
                file.size_kb(),
                preview.unwrap_or_default()
            );
        }
        (None, _) if form.is_drag_active() => {
            let _ = writeln!(out, "Drop it here");
        }
        (None, _) => {
            let _ = writeln!(out, "Drag an image or video here, or pick a file");
            let _ = writeln!(out, "PNG, JPG, GIF, MP4 up to 50MB");
        }
    }
    if !form.caption().is_empty() {
        let _ = writeln!(out, "Caption: {}", form.caption());
    }
    let _ = writeln!(out, "{} characters", form.caption_counter());
    let button = if form.is_loading() {
        "Publishing..."
    } else {
        "Publish"
    };
    let _ = writeln!(
        out,
        "[{}]{}",
        button,
        if form.can_submit() { "" } else { " (disabled)" }
    );
    out
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::{
        media::MediaFile,
        pages::upload::PreviewRegistry,
        post::{tests::sample_post, FileType},
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 16, 3, 0).unwrap()
    }

    fn signed_in() -> Session {
        Session::new(Some("tok".into()))
    }

    #[test]
    fn empty_feed_shows_empty_state() {
        let out = feed(&signed_in(), false, &[], &now(), &Utc);
        assert!(out.contains("No posts yet"));
        assert!(!out.contains(RULE));
        assert!(out.contains("Connected"));
    }

    #[test]
    fn loading_shows_only_header_and_spinner() {
        let out = feed(&signed_in(), true, &[sample_post("a", true)], &now(), &Utc);
        assert!(out.contains("Loading posts..."));
        assert!(!out.contains("alice@example.com"));
    }

    #[test]
    fn delete_control_only_for_owner() {
        let others = post_card(&sample_post("p1", false), &now(), &Utc);
        assert!(!others.contains("[delete"));

        let mine = post_card(&sample_post("p2", true), &now(), &Utc);
        assert!(mine.contains("[delete p2]"));
    }

    #[test]
    fn card_shows_author_media_and_dates() {
        let card = post_card(&sample_post("p1", false), &now(), &Utc);
        assert!(card.contains("(A) alice@example.com · 2h ago"));
        assert!(card.contains("[image] https://cdn.example.com/p1.jpg"));
        assert!(card.contains("alice sunset at the pier"));
        assert!(card.contains("Published 5 January 2026, 14:03"));
        assert!(card.contains("Like"));
    }

    #[test]
    fn non_image_posts_render_as_video() {
        let mut post = sample_post("v", false);
        post.file_type = FileType::Other;
        assert!(post_card(&post, &now(), &Utc).contains("[video]"));
    }

    #[test]
    fn relative_dates() {
        let now = now();
        let at = |d: Duration| now - d;
        assert_eq!(relative_date(&at(Duration::seconds(20)), &now, &Utc), "just now");
        assert_eq!(relative_date(&at(Duration::minutes(5)), &now, &Utc), "5m ago");
        assert_eq!(relative_date(&at(Duration::hours(3)), &now, &Utc), "3h ago");
        assert_eq!(relative_date(&at(Duration::days(2)), &now, &Utc), "2d ago");
        assert_eq!(relative_date(&at(Duration::days(30)), &now, &Utc), "6 Dec");
        assert_eq!(relative_date(&(now + Duration::hours(1)), &now, &Utc), "5 Jan");
    }

    #[test]
    fn upload_form_reflects_state() {
        let mut form = UploadForm::new(PreviewRegistry::default());
        let empty = upload_form(&form);
        assert!(empty.contains("Drag an image or video here"));
        assert!(empty.contains("[Publish] (disabled)"));

        form.pick(Some(MediaFile::new("clip.mp4", 4096)));
        form.set_caption("hi");
        let ready = upload_form(&form);
        assert!(ready.contains("[video] clip.mp4 (4 KB) blob:instafeed/1"));
        assert!(ready.contains("2/500 characters"));
        assert!(ready.ends_with("[Publish]\n"));
    }
}
