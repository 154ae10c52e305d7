use tempshell::app::{HostOps, ShellApp, SubmissionId};

struct AcceptingHost {
    next_submission_id: SubmissionId,
}

impl HostOps for AcceptingHost {
    fn begin_execute(&mut self, _command: String) -> Result<SubmissionId, String> {
        let submission_id = self.next_submission_id;
        self.next_submission_id += 1;
        Ok(submission_id)
    }

    fn fetch_status(&mut self) -> Result<String, String> {
        Ok(String::new())
    }

    fn request_render(&mut self) {}

    fn request_stop(&mut self) {}
}

/// Runs `commands` through full submit/complete cycles so the recall buffer
/// fills the way it does in use.
fn app_with_history(commands: &[&str]) -> ShellApp {
    let mut app = ShellApp::new();
    let mut host = AcceptingHost {
        next_submission_id: 1,
    };

    for (index, command) in commands.iter().enumerate() {
        app.on_input_replace((*command).to_string());
        app.on_submit(&mut host);
        app.on_execute_output(index as SubmissionId + 1, String::new(), Some(0));
    }

    app
}

#[test]
fn previous_recalls_newest_first() {
    let mut app = app_with_history(&["first", "second", "third"]);

    app.on_history_previous();
    assert_eq!(app.input, "third");
    app.on_history_previous();
    assert_eq!(app.input, "second");
    app.on_history_previous();
    assert_eq!(app.input, "first");
}

#[test]
fn previous_clamps_at_the_oldest_command() {
    let mut app = app_with_history(&["only"]);

    app.on_history_previous();
    app.on_history_previous();
    app.on_history_previous();

    assert_eq!(app.input, "only");
    assert_eq!(app.history_cursor(), Some(0));
}

#[test]
fn n_previous_then_n_next_returns_to_an_empty_input() {
    let commands = ["a", "b", "c", "d", "e"];
    let mut app = app_with_history(&commands);

    for _ in 0..commands.len() {
        app.on_history_previous();
        let cursor = app.history_cursor().expect("navigating");
        assert!(cursor < commands.len());
    }

    for _ in 0..commands.len() {
        app.on_history_next();
    }

    assert_eq!(app.input, "");
    assert_eq!(app.history_cursor(), None);
}

#[test]
fn cursor_never_leaves_bounds_under_a_mixed_walk() {
    let commands = ["a", "b", "c"];
    let mut app = app_with_history(&commands);

    let steps = [
        "prev", "prev", "next", "prev", "prev", "prev", "next", "next", "next", "next",
    ];
    for step in steps {
        match step {
            "prev" => app.on_history_previous(),
            _ => app.on_history_next(),
        }
        if let Some(cursor) = app.history_cursor() {
            assert!(cursor < commands.len());
        }
    }
}

#[test]
fn next_without_navigation_leaves_a_draft_untouched() {
    let mut app = app_with_history(&["ls"]);
    app.on_input_replace("half-typed".to_string());

    app.on_history_next();

    assert_eq!(app.input, "half-typed");
}

#[test]
fn history_keeps_duplicates_and_insertion_order() {
    let app = app_with_history(&["ls", "pwd", "ls"]);
    assert_eq!(app.history_entries(), ["ls", "pwd", "ls"]);
}

#[test]
fn submitting_after_recall_resubmits_and_resets_the_cursor() {
    let mut app = app_with_history(&["echo one", "echo two"]);
    let mut host = AcceptingHost {
        next_submission_id: 10,
    };

    app.on_history_previous();
    app.on_history_previous();
    assert_eq!(app.input, "echo one");

    app.on_submit(&mut host);

    assert_eq!(app.history_cursor(), None);
    assert_eq!(app.history_entries(), ["echo one", "echo two", "echo one"]);
}
