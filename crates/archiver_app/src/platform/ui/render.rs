use archiver_core::{
    AppViewModel, ArchiveRowView, FormView, JobRowView, JobStatus, JobsPanelView, LoadState,
    Screen, ScopeType,
};
use chrono::{DateTime, Utc};

use super::constants::*;

/// Renders the view model as terminal lines. `server` is the backend origin
/// used to turn the viewer path into an openable URL.
pub fn render(view: &AppViewModel, server: &str) -> Vec<String> {
    let mut lines = match view.screen {
        Screen::Archives => render_archives(view, server),
        Screen::CreateArchive => render_form(&view.form),
    };

    if view.jobs.open {
        lines.push(String::new());
        lines.extend(render_jobs(&view.jobs));
    }

    if let Some(notice) = &view.notice {
        lines.push(format!("! {notice}"));
    }
    lines
}

fn render_archives(view: &AppViewModel, server: &str) -> Vec<String> {
    let mut lines = Vec::new();

    let mut header = match &view.archives {
        Some(rows) => format!("Archives ({} of {})", rows.len(), view.archive_total),
        None => "Archives".to_string(),
    };
    if view.loading {
        header.push_str(" [refreshing]");
    }
    if !view.search_query.is_empty() {
        header.push_str(&format!(" search: \"{}\"", view.search_query));
    }
    lines.push(header);

    match &view.archives {
        Some(rows) if rows.is_empty() => lines.push("  (no archives)".to_string()),
        Some(rows) => lines.extend(rows.iter().map(|row| render_archive_row(row, view))),
        None => match &view.archive_load {
            LoadState::Failed(message) => {
                lines.push(format!("  Archive list unavailable: {message}"));
            }
            _ => lines.push(format!("  {LOADING_PLACEHOLDER}")),
        },
    }

    if let (Some(_), LoadState::Failed(message)) = (&view.archives, &view.archive_load) {
        lines.push(format!("  (last refresh failed: {message})"));
    }

    if let Some(name) = &view.pending_delete {
        lines.push(format!("Pending delete: {name}"));
    }

    lines.push(match &view.viewer {
        Some(target) => format!("Viewer: {}", viewer_link(server, &target.viewer_url)),
        None => format!("Viewer: {NO_SELECTION}"),
    });
    lines
}

fn render_archive_row(row: &ArchiveRowView, view: &AppViewModel) -> String {
    let marker = if row.selected { '>' } else { ' ' };
    match (&view.editing, row.editing) {
        (Some(edit), true) => format!(
            "{marker} {} -> [{}]  (save | cancel)",
            row.display_name, edit.value
        ),
        _ => format!("{marker} {}", row.display_name),
    }
}

fn render_jobs(jobs: &JobsPanelView) -> Vec<String> {
    let mut lines = Vec::with_capacity(jobs.rows.len() + 2);
    lines.push(if jobs.loading {
        "Jobs [refreshing]".to_string()
    } else {
        "Jobs".to_string()
    });
    if jobs.rows.is_empty() {
        lines.push(format!("  {NO_JOBS}"));
    }
    lines.extend(jobs.rows.iter().map(render_job_row));
    lines
}

fn render_job_row(job: &JobRowView) -> String {
    let created = format_created_at(&job.created_at);
    let tone = match job.tone {
        JobStatus::Completed => "ok",
        JobStatus::Failed => "!!",
        JobStatus::InProgress => "..",
    };
    format!(
        "  {} [{} {}] {} {}",
        job.short_id,
        tone,
        job.status.to_uppercase(),
        job.url,
        created
    )
    .trim_end()
    .to_string()
}

/// RFC 3339 timestamps are shown in UTC to the minute; anything else as sent.
pub fn format_created_at(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

fn render_form(form: &FormView) -> Vec<String> {
    let mut lines = vec![
        "Create New Archive".to_string(),
        format!("  url         {}", placeholder(&form.url, "https://example.com")),
        format!("  name        {}", placeholder(&form.name, "(optional)")),
        format!("  scope       {} ({})", form.scope, form.scope.label()),
        format!("  depth       {}   (-1 for unlimited)", form.depth),
        format!("  page_limit  {}", form.page_limit),
        format!("  size_limit  {}   (MB, 0 for unlimited)", form.size_limit),
    ];
    if form.submitting {
        lines.push("  Submitting...".to_string());
    }
    if let Some(error) = &form.error {
        lines.push(format!("  Error: {error}"));
    }
    lines
}

fn placeholder<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

pub fn render_scopes() -> Vec<String> {
    ScopeType::ALL
        .into_iter()
        .map(|scope| format!("  {:<9} {}", scope.as_str(), scope.description()))
        .collect()
}

pub fn viewer_link(server: &str, viewer_path: &str) -> String {
    format!("{}{}", server.trim_end_matches('/'), viewer_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archiver_core::{update, AppState, Archive, Job, Msg};

    fn loaded_state() -> AppState {
        let (state, _) = update(AppState::new(), Msg::Started);
        let (state, _) = update(
            state,
            Msg::ArchivesLoaded(Ok(vec![Archive::new("foo.wacz"), Archive::new("bar.wacz")])),
        );
        state
    }

    #[test]
    fn unloaded_list_shows_placeholder() {
        let (state, _) = update(AppState::new(), Msg::Started);
        let lines = render(&state.view(), "http://host");
        assert!(lines.iter().any(|l| l.contains(LOADING_PLACEHOLDER)));
        assert!(lines.iter().any(|l| l.contains(NO_SELECTION)));
    }

    #[test]
    fn rows_use_display_names_and_mark_selection() {
        let (state, _) = update(loaded_state(), Msg::SelectArchive("bar.wacz".to_string()));
        let lines = render(&state.view(), "http://host:1080/");
        assert_eq!(lines[0], "Archives (2 of 2)");
        assert_eq!(lines[1], "  foo");
        assert_eq!(lines[2], "> bar");
        assert_eq!(
            lines[3],
            "Viewer: http://host:1080/viewer.html?source=%2Fapi%2Farchives%2Fbar.wacz"
        );
    }

    #[test]
    fn failed_refresh_is_reported_even_when_search_hides_every_row() {
        let (state, _) = update(loaded_state(), Msg::SearchChanged("zzz".to_string()));
        let (state, _) = update(state, Msg::RefreshArchives);
        let (state, _) = update(
            state,
            Msg::ArchivesLoaded(Err("API Error: Bad Gateway".to_string())),
        );
        let lines = render(&state.view(), "http://host");
        assert!(lines.contains(&"  (no archives)".to_string()));
        assert!(lines.contains(&"  (last refresh failed: API Error: Bad Gateway)".to_string()));
    }

    #[test]
    fn editing_row_shows_buffer() {
        let (state, _) = update(loaded_state(), Msg::StartRename("foo.wacz".to_string()));
        let (state, _) = update(state, Msg::EditChanged("food".to_string()));
        let lines = render(&state.view(), "http://host");
        assert_eq!(lines[1], "  foo -> [food]  (save | cancel)");
    }

    #[test]
    fn job_rows_show_status_and_timestamp() {
        let (state, _) = update(AppState::new(), Msg::JobsPanelToggled(true));
        let (state, _) = update(
            state,
            Msg::JobsLoaded(Ok(vec![Job {
                id: "4f7b2c1e-0000".to_string(),
                url: "https://example.com".to_string(),
                status: "completed".to_string(),
                created_at: "2024-05-01T12:30:00+02:00".to_string(),
            }])),
        );
        let lines = render(&state.view(), "http://host");
        assert!(lines.contains(
            &"  4f7b2c1e [ok COMPLETED] https://example.com 2024-05-01 10:30 UTC".to_string()
        ));
    }

    #[test]
    fn empty_job_panel_says_so() {
        let (state, _) = update(AppState::new(), Msg::JobsPanelToggled(true));
        let (state, _) = update(state, Msg::JobsLoaded(Ok(Vec::new())));
        let lines = render(&state.view(), "http://host");
        assert!(lines.iter().any(|l| l.contains(NO_JOBS)));
    }

    #[test]
    fn unparsable_timestamp_is_shown_verbatim() {
        assert_eq!(format_created_at("yesterday"), "yesterday");
        assert_eq!(format_created_at(""), "");
    }
}
