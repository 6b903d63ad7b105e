use cinedex_core::filters::{FilterCodec, FilterValue};
use cinedex_core::types::MediaKind;
use cinedex_tmdb::models::{Genre, WatchProvider};

use super::escape;
use crate::discover::{
    GENRES_KEY, LANGUAGE_KEY, PROVIDERS_KEY, SORT_KEY, VOTE_AVERAGE_KEY, VOTE_COUNT_KEY,
    date_keys, sort_options,
};

/// Everything the discover filter panel needs to render.
pub struct FilterPanel<'a> {
    pub kind: MediaKind,
    pub base_path: &'a str,
    pub codec: &'a FilterCodec,
    pub genres: &'a [Genre],
    pub providers: &'a [WatchProvider],
}

impl FilterPanel<'_> {
    /// Target of the "Clear" button. Carries the applied query so the
    /// results stay put while the form shows the defaults.
    fn clear_action(&self) -> String {
        let applied = self.codec.applied_query();
        if applied.is_empty() {
            format!("{}/clear", self.base_path)
        } else {
            format!("{}/clear?{applied}", self.base_path)
        }
    }

    fn scalar(&self, key: &str) -> String {
        match self.codec.get_filter(key) {
            FilterValue::Scalar(v) => v,
            FilterValue::Multi(_) => String::new(),
        }
    }

    fn selected(&self, key: &str, id: u64) -> bool {
        self.codec
            .get_filter(key)
            .as_selection()
            .is_some_and(|sel| sel.contains(&id.to_string()))
    }
}

fn checkbox(class: &str, name: &str, id: u64, label: &str, checked: bool) -> String {
    format!(
        r#"<label class="{class}"><input type="checkbox" name="{name}" value="{id}"{}> {}</label>"#,
        if checked { " checked" } else { "" },
        escape(label)
    )
}

fn input(label: &str, name: &str, kind: &str, value: &str, extra: &str) -> String {
    format!(
        r#"<label class="field"><span class="text-muted-foreground">{}</span><input type="{kind}" name="{name}" value="{}"{extra}></label>"#,
        escape(label),
        escape(value)
    )
}

/// Collapsible filter panel: the edit form with genre badges, "Clear" and
/// "Save Changes", and a badge with the active filter count. Nothing
/// navigates until the form is saved.
pub fn discover_filters(panel: &FilterPanel<'_>) -> String {
    let count = panel.codec.count();
    let badge = if count > 0 {
        format!(r#" <span class="badge">{count}</span>"#)
    } else {
        String::new()
    };

    let genre_badges: String = panel
        .genres
        .iter()
        .map(|g| {
            let selected = panel.selected(GENRES_KEY, g.id);
            let class = if selected {
                "badge badge-default"
            } else {
                "badge badge-secondary"
            };
            checkbox(class, GENRES_KEY, g.id, &g.name, selected)
        })
        .collect();

    let pending = if panel.codec.has_pending_changes() {
        r#"<p class="pending-note">Unsaved changes</p>"#
    } else {
        ""
    };

    let provider_boxes: String = panel
        .providers
        .iter()
        .map(|p| {
            checkbox(
                "checkbox",
                PROVIDERS_KEY,
                p.provider_id,
                &p.provider_name,
                panel.selected(PROVIDERS_KEY, p.provider_id),
            )
        })
        .collect();

    let current_sort = panel.scalar(SORT_KEY);
    let sort_select: String = sort_options(panel.kind)
        .iter()
        .map(|s| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                s.value,
                if s.value == current_sort { " selected" } else { "" },
                escape(s.label)
            )
        })
        .collect();

    let (date_from, date_to) = date_keys(panel.kind);

    format!(
        concat!(
            r#"<details class="discover-filters"{open}><summary>Filters{badge}</summary>"#,
            r#"<form method="post" action="{action}" class="filter-form">{pending}"#,
            r#"<fieldset><legend>Genres</legend><div class="flex flex-wrap gap-2">{genre_badges}</div></fieldset>"#,
            r#"<fieldset><legend>Where to watch</legend>{provider_boxes}</fieldset>"#,
            r#"<label class="field"><span class="text-muted-foreground">Sort by</span>"#,
            r#"<select name="{sort_key}">{sort_select}</select></label>"#,
            "{language}{from}{to}{vote_average}{vote_count}",
            r#"<div class="filter-actions"><button type="submit" class="button secondary" formaction="{clear}" formnovalidate>Clear</button>"#,
            r#"<button type="submit">Save Changes</button></div>"#,
            "</form></details>"
        ),
        open = if pending.is_empty() { "" } else { " open" },
        badge = badge,
        action = escape(panel.base_path),
        pending = pending,
        genre_badges = genre_badges,
        provider_boxes = provider_boxes,
        sort_key = SORT_KEY,
        sort_select = sort_select,
        language = input(
            "Language (ISO 639-1)",
            LANGUAGE_KEY,
            "text",
            &panel.scalar(LANGUAGE_KEY),
            r#" maxlength="2""#
        ),
        from = input("From", date_from, "date", &panel.scalar(date_from), ""),
        to = input("To", date_to, "date", &panel.scalar(date_to), ""),
        vote_average = input(
            "Minimum rating",
            VOTE_AVERAGE_KEY,
            "number",
            &panel.scalar(VOTE_AVERAGE_KEY),
            r#" min="0" max="10" step="0.5""#
        ),
        vote_count = input(
            "Minimum votes",
            VOTE_COUNT_KEY,
            "number",
            &panel.scalar(VOTE_COUNT_KEY),
            r#" min="0" step="50""#
        ),
        clear = escape(&panel.clear_action()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::schema_for;
    use std::sync::Arc;

    fn genres() -> Vec<Genre> {
        vec![
            Genre {
                id: 28,
                name: "Action".into(),
            },
            Genre {
                id: 35,
                name: "Comedy".into(),
            },
        ]
    }

    fn codec(query: &str) -> FilterCodec {
        FilterCodec::from_query(Arc::new(schema_for(MediaKind::Movie)), query)
    }

    fn render(query: &str) -> String {
        render_codec(&codec(query))
    }

    fn render_codec(codec: &FilterCodec) -> String {
        let genres = genres();
        let providers = vec![WatchProvider {
            provider_id: 8,
            provider_name: "Netflix".into(),
            logo_path: None,
        }];
        discover_filters(&FilterPanel {
            kind: MediaKind::Movie,
            base_path: "/discover/movie",
            codec,
            genres: &genres,
            providers: &providers,
        })
    }

    #[test]
    fn no_badge_without_active_filters() {
        let html = render("");
        assert!(html.contains("<summary>Filters</summary>"));
        assert!(html.contains("Save Changes"));
        assert!(html.contains(r#"formaction="/discover/movie/clear" formnovalidate>Clear</button>"#));
        assert!(!html.contains("Unsaved changes"));
    }

    #[test]
    fn badge_counts_active_filters() {
        let html = render("with_genres=28&vote_average.gte=7");
        assert!(html.contains(r#"Filters <span class="badge">2</span>"#));
    }

    #[test]
    fn genre_badges_are_form_fields() {
        let html = render("with_genres=28&sort_by=vote_average.desc");
        assert!(html.contains(
            r#"<label class="badge badge-default"><input type="checkbox" name="with_genres" value="28" checked> Action</label>"#
        ));
        assert!(html.contains(
            r#"<label class="badge badge-secondary"><input type="checkbox" name="with_genres" value="35"> Comedy</label>"#
        ));
        // Only the form submits; no badge navigates on its own.
        assert!(!html.contains("<a class=\"badge"));
        assert!(html.contains(
            r#"formaction="/discover/movie/clear?with_genres=28&amp;sort_by=vote_average.desc""#
        ));
    }

    #[test]
    fn cleared_panel_shows_unsaved_defaults() {
        let mut codec = codec("with_genres=28&vote_average.gte=7");
        codec.clear_filters();
        let html = render_codec(&codec);
        assert!(html.contains(r#"<details class="discover-filters" open><summary>Filters</summary>"#));
        assert!(html.contains("Unsaved changes"));
        assert!(!html.contains(" checked"));
        assert!(html.contains(r#"name="vote_average.gte" value="""#));
        // Clearing again still starts from what is applied.
        assert!(html.contains(r#"formaction="/discover/movie/clear?with_genres=28&amp;vote_average.gte=7""#));
    }

    #[test]
    fn form_reflects_applied_values() {
        let html = render("with_genres=35&with_watch_providers=8&sort_by=vote_average.desc&vote_count.gte=100");
        assert!(html.contains(r#"name="with_genres" value="35" checked"#));
        assert!(html.contains(r#"name="with_genres" value="28">"#));
        assert!(html.contains(r#"name="with_watch_providers" value="8" checked"#));
        assert!(html.contains(r#"<option value="vote_average.desc" selected>"#));
        assert!(html.contains(r#"name="vote_count.gte" value="100""#));
    }
}
