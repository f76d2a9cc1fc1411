//! Display labels and suppression rules for configuration options.
//!
//! Both tables are process-wide constants: initialized once, read-only,
//! shared without a guard.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Option keys starting with one of these prefixes are never recorded.
/// The match is case-sensitive on the raw key.
pub const IGNORE_PREFIXES: [&str; 3] = ["_transient", "_site_transient", "theme_mods_"];

lazy_static! {
    /// Display labels for well-known configuration option keys.
    static ref OPTION_LABELS: HashMap<&'static str, &'static str> = {
        let mut labels = HashMap::new();
        labels.insert("blogname", "Site title");
        labels.insert("blogdescription", "Tagline");
        labels.insert("siteurl", "Site URL");
        labels.insert("home", "Home URL");
        labels.insert("admin_email", "Administration email address");
        labels.insert("users_can_register", "Membership");
        labels.insert("default_role", "New user default role");
        labels.insert("timezone_string", "Timezone");
        labels.insert("date_format", "Date format");
        labels.insert("time_format", "Time format");
        labels.insert("start_of_week", "Week starts on");
        labels.insert("default_category", "Default post category");
        labels.insert("default_post_format", "Default post format");
        labels.insert("show_on_front", "Homepage displays");
        labels.insert("page_on_front", "Homepage");
        labels.insert("page_for_posts", "Posts page");
        labels.insert("posts_per_page", "Blog pages show at most");
        labels.insert("posts_per_rss", "Syndication feeds show the most recent");
        labels.insert("rss_use_excerpt", "For each post in a feed, include");
        labels.insert("blog_public", "Search engine visibility");
        labels.insert("default_pingback_flag", "Attempt to notify any blogs linked to from the post");
        labels.insert("default_ping_status", "Allow link notifications from other blogs");
        labels.insert("default_comment_status", "Allow people to submit comments on new posts");
        labels.insert("comment_registration", "Users must be registered and logged in to comment");
        labels.insert("thread_comments", "Enable threaded comments");
        labels.insert("thread_comments_depth", "Threaded comments depth");
        labels.insert("page_comments", "Break comments into pages");
        labels.insert("comments_per_page", "Comments per page");
        labels.insert("default_comments_page", "Comments page displayed by default");
        labels.insert("comment_order", "Comment order");
        labels.insert("avatar_default", "Default avatar");
        labels.insert("thumbnail_size_w", "Thumbnail width");
        labels.insert("thumbnail_size_h", "Thumbnail height");
        labels.insert("medium_size_w", "Medium image width");
        labels.insert("medium_size_h", "Medium image height");
        labels.insert("large_size_w", "Large image width");
        labels.insert("large_size_h", "Large image height");
        labels.insert("uploads_use_yearmonth_folders", "Organize uploads into month- and year-based folders");
        labels.insert("permalink_structure", "Permalink structure");
        labels.insert("category_base", "Category base");
        labels.insert("tag_base", "Tag base");
        labels.insert("page_for_privacy_policy", "Privacy policy page");
        labels
    };
}

/// True when changes to `key` are suppressed outright.
pub fn is_ignored(key: &str) -> bool {
    IGNORE_PREFIXES.iter().any(|prefix| key.starts_with(prefix))
}

/// Display label for an option key, falling back to the raw key.
pub fn lookup_label(key: &str) -> &str {
    OPTION_LABELS.get(key).copied().unwrap_or(key)
}
