use crate::state::{RENAME_FAILED, Screen};
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Rename and delete never edit the cached list directly; a successful
/// outcome always re-fetches the list instead.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started | Msg::RefreshArchives => refresh_archives(&mut state),
        Msg::ArchivesLoaded(result) => {
            match result {
                Ok(archives) => state.archives_mut().apply_loaded(archives),
                // Prior list stays in place; `None` if this was the first load.
                Err(message) => state.archives_mut().apply_load_failed(message),
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::SearchChanged(query) => {
            state.archives_mut().set_search_query(query);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SelectArchive(name) => {
            state.set_selected(name);
            state.mark_dirty();
            Vec::new()
        }
        Msg::StartRename(name) => {
            state.archives_mut().start_editing(name);
            state.mark_dirty();
            Vec::new()
        }
        Msg::EditChanged(value) => {
            if state.archives().editing().is_none() {
                return (state, Vec::new());
            }
            state.archives_mut().set_edit_value(value);
            state.mark_dirty();
            Vec::new()
        }
        Msg::CancelRename => {
            if state.archives().editing().is_none() {
                return (state, Vec::new());
            }
            state.archives_mut().stop_editing();
            state.mark_dirty();
            Vec::new()
        }
        Msg::CommitRename => match state.archives().rename_request() {
            Some((from, to)) => {
                state.archives_mut().begin_rename(from.clone(), to.clone());
                state.mark_dirty();
                vec![Effect::RenameArchive { from, to }]
            }
            None => Vec::new(),
        },
        Msg::RenameFinished { from, to, result } => {
            state.archives_mut().finish_rename();
            match result {
                Ok(canonical) => {
                    state.follow_rename(&from, &to, canonical);
                    if state.archives().editing() == Some(from.as_str()) {
                        state.archives_mut().stop_editing();
                    }
                    refresh_archives(&mut state)
                }
                Err(_) => {
                    // Edit mode stays so the user can correct the name.
                    state.set_notice(Some(RENAME_FAILED.to_string()));
                    state.mark_dirty();
                    Vec::new()
                }
            }
        }
        Msg::RequestDelete(name) => {
            state.archives_mut().set_pending_delete(Some(name.clone()));
            state.mark_dirty();
            vec![Effect::ConfirmDelete { name }]
        }
        Msg::DeleteConfirmed => match state.archives_mut().take_pending_delete() {
            Some(name) => {
                state.mark_dirty();
                vec![Effect::DeleteArchive { name }]
            }
            None => Vec::new(),
        },
        Msg::DeleteCancelled => {
            if state.archives_mut().take_pending_delete().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DeleteFinished { name, result } => match result {
            Ok(()) => {
                if state.selected() == name {
                    state.set_selected(String::new());
                }
                refresh_archives(&mut state)
            }
            Err(message) => {
                state.set_notice(Some(format!("Failed to delete {name}: {message}")));
                state.mark_dirty();
                Vec::new()
            }
        },
        Msg::JobsPanelToggled(open) => {
            let opened = state.jobs_mut().set_open(open);
            state.mark_dirty();
            if opened {
                refresh_jobs(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::RefreshJobs => refresh_jobs(&mut state),
        Msg::JobsLoaded(result) => {
            match result {
                Ok(jobs) => state.jobs_mut().apply_loaded(jobs),
                Err(message) => state.jobs_mut().apply_load_failed(message),
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::OpenCreateForm => {
            state.set_screen(Screen::CreateArchive);
            state.mark_dirty();
            Vec::new()
        }
        Msg::CloseCreateForm => {
            state.set_screen(Screen::Archives);
            state.mark_dirty();
            Vec::new()
        }
        Msg::FormFieldChanged(field, value) => {
            state.form_mut().set_field(field, value);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SubmitForm => {
            if state.form().is_submitting() {
                return (state, Vec::new());
            }
            state.mark_dirty();
            match state.form().build_submission() {
                Ok(submission) => {
                    let form = state.form_mut();
                    form.set_error(None);
                    form.set_submitting(true);
                    vec![Effect::CreateJob(submission)]
                }
                Err(error) => {
                    state.form_mut().set_error(Some(error));
                    Vec::new()
                }
            }
        }
        Msg::JobCreated(result) => {
            match result {
                Ok(job_id) => {
                    state.reset_form();
                    state.set_screen(Screen::Archives);
                    state.set_notice(Some(format!("Job {job_id} queued")));
                }
                Err(message) => {
                    let form = state.form_mut();
                    form.set_submitting(false);
                    form.set_error(Some(message));
                }
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::DismissNotice => {
            if state.notice().is_some() {
                state.set_notice(None);
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn refresh_archives(state: &mut AppState) -> Vec<Effect> {
    state.archives_mut().begin_load();
    state.mark_dirty();
    vec![Effect::FetchArchives]
}

fn refresh_jobs(state: &mut AppState) -> Vec<Effect> {
    state.jobs_mut().begin_load();
    state.mark_dirty();
    vec![Effect::FetchJobs]
}
