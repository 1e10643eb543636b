//! Drives a session on behalf of a front end.
//!
//! The controller owns a [`QuizSession`] and a [`QuizView`]. Front ends feed
//! it user actions (submit, navigate, finish, restart) and it updates the
//! session and tells the view what to show.

use std::str::FromStr;

use crate::error::QuizError;
use crate::evaluator::QuizSession;
use crate::model::{Direction, Question, QuestionKind, RawInput, Verdict};
use crate::report::QuizReport;
use crate::traits::{Feedback, FeedbackOptions, QuestionView, QuizView};

/// A user action in a line-oriented front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Anything that is not a `:command` is an answer to the current question.
    /// A leading `::` submits the rest of the line with a single `:`.
    Answer(String),
    Navigate(Direction),
    Finish,
    Restart,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = QuizError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let trimmed = line.trim();
        let Some(name) = trimmed.strip_prefix(':') else {
            return Ok(Command::Answer(line.to_string()));
        };
        if name.starts_with(':') {
            return Ok(Command::Answer(name.to_string()));
        }

        match name.trim().to_lowercase().as_str() {
            "n" | "next" => Ok(Command::Navigate(Direction::Next)),
            "p" | "prev" | "previous" => Ok(Command::Navigate(Direction::Previous)),
            "r" | "results" | "finish" => Ok(Command::Finish),
            "restart" => Ok(Command::Restart),
            "?" | "h" | "help" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(QuizError::InvalidInput(format!(
                "unknown command :{other}, type :help for a list"
            ))),
        }
    }
}

/// Parse a typed answer for `question`.
///
/// Choice questions take 1-based option numbers (several separated by commas
/// or spaces for multiple choice). A blank line means nothing was selected.
pub fn parse_answer(question: &Question, line: &str) -> Result<RawInput, QuizError> {
    match question.kind() {
        QuestionKind::Fill => Ok(RawInput::Fill(line.to_string())),
        QuestionKind::Single => {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return Ok(RawInput::Single(None));
            }
            parse_option_number(question, trimmed).map(|i| RawInput::Single(Some(i)))
        }
        QuestionKind::Multiple => line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| parse_option_number(question, s))
            .collect::<Result<Vec<_>, _>>()
            .map(RawInput::Multiple),
    }
}

fn parse_option_number(question: &Question, s: &str) -> Result<usize, QuizError> {
    let count = question.options.len();
    match s.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
        _ => Err(QuizError::InvalidInput(format!(
            "'{s}' is not an option, enter a number between 1 and {count}"
        ))),
    }
}

/// Whether the front end should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Connects a session to a view.
pub struct QuizController<V: QuizView> {
    session: QuizSession,
    view: V,
    options: FeedbackOptions,
    report: Option<QuizReport>,
}

impl<V: QuizView> QuizController<V> {
    pub fn new(session: QuizSession, view: V) -> Self {
        Self {
            session,
            view,
            options: FeedbackOptions::default(),
            report: None,
        }
    }

    pub fn with_options(mut self, options: FeedbackOptions) -> Self {
        self.options = options;
        self
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// The report from the last finish, cleared on restart.
    pub fn report(&self) -> Option<&QuizReport> {
        self.report.as_ref()
    }

    pub fn into_parts(self) -> (QuizSession, V) {
        (self.session, self.view)
    }

    /// Render the current question.
    pub fn start(&mut self) {
        self.render_current();
    }

    /// Grade `input` against the current question and show feedback.
    ///
    /// User-facing errors are shown as a retry prompt and also returned.
    pub fn on_submit(&mut self, input: RawInput) -> Result<Verdict, QuizError> {
        match self.session.grade(&input) {
            Ok(verdict) => {
                let feedback = Feedback::for_verdict(self.session.current(), &verdict, self.options);
                self.view.show_feedback(&feedback);
                Ok(verdict)
            }
            Err(e) => {
                if e.is_user_facing() {
                    self.view.show_feedback(&Feedback::retry(&e));
                }
                Err(e)
            }
        }
    }

    /// Parse a typed answer and submit it.
    pub fn on_answer_line(&mut self, line: &str) -> Result<Verdict, QuizError> {
        if self.session.is_finished() {
            return self.reject(QuizError::SessionFinished);
        }
        match parse_answer(self.session.current(), line) {
            Ok(input) => self.on_submit(input),
            Err(e) => self.reject(e),
        }
    }

    /// Move and re-render. Staying put at either end renders nothing.
    pub fn on_navigate(&mut self, direction: Direction) -> Result<usize, QuizError> {
        if self.session.is_finished() {
            return self.reject(QuizError::SessionFinished);
        }
        let before = self.session.position();
        let after = self.session.navigate(direction);
        if after != before {
            self.render_current();
        }
        Ok(after)
    }

    /// Enter the results view.
    pub fn on_finish(&mut self) -> &QuizReport {
        let report = self.session.finish();
        self.view.show_results(&report);
        self.report.insert(report)
    }

    /// Start over from the first question.
    pub fn on_restart(&mut self) {
        self.session.restart();
        self.report = None;
        self.render_current();
    }

    /// Dispatch one command. User-facing errors have already been shown and
    /// do not stop the loop.
    pub fn handle(&mut self, command: Command) -> Result<Flow, QuizError> {
        let result = match command {
            Command::Answer(line) => self.on_answer_line(&line).map(|_| ()),
            Command::Navigate(direction) => self.on_navigate(direction).map(|_| ()),
            Command::Finish => {
                self.on_finish();
                Ok(())
            }
            Command::Restart => {
                self.on_restart();
                Ok(())
            }
            Command::Help => {
                self.view.show_help();
                Ok(())
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        match result {
            Ok(()) => Ok(Flow::Continue),
            Err(e) if e.is_user_facing() => Ok(Flow::Continue),
            Err(e) => Err(e),
        }
    }

    /// Parse and dispatch one line of input.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow, QuizError> {
        match line.parse::<Command>() {
            Ok(command) => self.handle(command),
            Err(e) => {
                self.view.show_feedback(&Feedback::retry(&e));
                Ok(Flow::Continue)
            }
        }
    }

    fn render_current(&mut self) {
        let view = QuestionView::from_session(&self.session);
        self.view.render_question(&view);
    }

    fn reject<T>(&mut self, error: QuizError) -> Result<T, QuizError> {
        self.view.show_feedback(&Feedback::retry(&error));
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerValue, Score, SessionStatus};
    use crate::parser::sample_bank;
    use crate::traits::FeedbackKind;

    /// Records everything the controller asks it to show.
    #[derive(Default)]
    struct RecordingView {
        rendered: Vec<(usize, Option<String>)>,
        feedback: Vec<Feedback>,
        results: Vec<Score>,
        help_shown: usize,
    }

    impl QuizView for RecordingView {
        fn render_question(&mut self, view: &QuestionView<'_>) {
            self.rendered.push((view.number, view.saved_text()));
        }

        fn show_feedback(&mut self, feedback: &Feedback) {
            self.feedback.push(feedback.clone());
        }

        fn show_results(&mut self, report: &QuizReport) {
            self.results.push(report.score);
        }

        fn show_help(&mut self) {
            self.help_shown += 1;
        }
    }

    fn controller() -> QuizController<RecordingView> {
        let mut c = QuizController::new(
            QuizSession::new(sample_bank().unwrap()),
            RecordingView::default(),
        );
        c.start();
        c
    }

    fn last_feedback(c: &QuizController<RecordingView>) -> &Feedback {
        c.view().feedback.last().unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(":n".parse::<Command>().unwrap(), Command::Navigate(Direction::Next));
        assert_eq!(
            " :Prev ".parse::<Command>().unwrap(),
            Command::Navigate(Direction::Previous)
        );
        assert_eq!(":results".parse::<Command>().unwrap(), Command::Finish);
        assert_eq!(":restart".parse::<Command>().unwrap(), Command::Restart);
        assert_eq!(":?".parse::<Command>().unwrap(), Command::Help);
        assert_eq!(":q".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!(
            "next".parse::<Command>().unwrap(),
            Command::Answer("next".into())
        );
        assert!(":jump".parse::<Command>().is_err());
    }

    #[test]
    fn double_colon_escapes_answer() {
        assert_eq!(
            "::root".parse::<Command>().unwrap(),
            Command::Answer(":root".into())
        );
        assert_eq!(
            " ::next ".parse::<Command>().unwrap(),
            Command::Answer(":next".into())
        );
    }

    #[test]
    fn colon_answer_is_graded() {
        let bank = crate::parser::parse_bank_str(
            r#"
[bank]
id = "css"
name = "CSS"

[[questions]]
id = 1
type = "fill"
prompt = "Which pseudo-class matches the document root?"
answer = [":root"]
"#,
            std::path::Path::new("css.toml"),
        )
        .unwrap();
        let mut c = QuizController::new(QuizSession::new(bank), RecordingView::default());
        c.start();

        c.handle_line("::root").unwrap();
        assert_eq!(last_feedback(&c).kind, FeedbackKind::Correct);
        assert_eq!(c.session().score(), Score::new(1, 1));
    }

    #[test]
    fn parse_answers_per_kind() {
        let bank = sample_bank().unwrap();
        let single = bank.find_by_id("1").unwrap();
        assert_eq!(parse_answer(single, "3").unwrap(), RawInput::Single(Some(2)));
        assert_eq!(parse_answer(single, "  ").unwrap(), RawInput::Single(None));
        assert!(parse_answer(single, "0").is_err());
        assert!(parse_answer(single, "5").is_err());
        assert!(parse_answer(single, "three").is_err());

        let multiple = bank.find_by_id("2").unwrap();
        assert_eq!(
            parse_answer(multiple, "5, 2 3").unwrap(),
            RawInput::Multiple(vec![4, 1, 2])
        );
        assert_eq!(parse_answer(multiple, "").unwrap(), RawInput::Multiple(vec![]));

        let fill = bank.find_by_id("3").unwrap();
        assert_eq!(
            parse_answer(fill, " Color ").unwrap(),
            RawInput::Fill(" Color ".into())
        );
    }

    #[test]
    fn start_renders_first_question() {
        let c = controller();
        assert_eq!(c.view().rendered, vec![(1, None)]);
    }

    #[test]
    fn submit_shows_feedback() {
        let mut c = controller();
        let verdict = c.on_submit(RawInput::Single(Some(2))).unwrap();
        assert!(verdict.correct);
        assert_eq!(last_feedback(&c).kind, FeedbackKind::Correct);

        let err = c.on_submit(RawInput::Single(None)).unwrap_err();
        assert!(err.is_user_facing());
        assert_eq!(last_feedback(&c).message, "Please select an option.");
        assert_eq!(c.session().answered_count(), 1);
    }

    #[test]
    fn integration_errors_are_not_shown() {
        let mut c = controller();
        let err = c.on_submit(RawInput::Fill("x".into())).unwrap_err();
        assert!(matches!(err, QuizError::InputMismatch { .. }));
        assert!(c.view().feedback.is_empty());
        assert!(c.handle(Command::Answer("9".into())).is_ok());
    }

    #[test]
    fn navigation_restores_saved_answer() {
        let mut c = controller();
        c.on_answer_line("3").unwrap();
        c.on_navigate(Direction::Next).unwrap();
        c.on_navigate(Direction::Previous).unwrap();
        assert_eq!(
            c.view().rendered,
            vec![(1, None), (2, None), (1, Some("JavaScript".into()))]
        );
    }

    #[test]
    fn navigation_at_boundary_does_not_rerender() {
        let mut c = controller();
        assert_eq!(c.on_navigate(Direction::Previous).unwrap(), 0);
        assert_eq!(c.view().rendered.len(), 1);
    }

    #[test]
    fn handle_line_runs_sample_scenario() {
        let mut c = controller();
        for line in ["3", ":n", "2,3", ":n", "Color", ":results"] {
            assert_eq!(c.handle_line(line).unwrap(), Flow::Continue);
        }
        assert_eq!(c.view().results, vec![Score::new(2, 5)]);
        assert_eq!(c.report().unwrap().score, Score::new(2, 5));
        assert_eq!(c.session().status(), SessionStatus::Finished);
    }

    #[test]
    fn finished_controller_rejects_answers_until_restart() {
        let mut c = controller();
        c.handle_line("3").unwrap();
        c.handle_line(":r").unwrap();

        assert_eq!(c.handle_line("1").unwrap(), Flow::Continue);
        assert_eq!(last_feedback(&c).kind, FeedbackKind::Retry);
        assert_eq!(
            c.session().current_answer().unwrap().value,
            AnswerValue::Single(2)
        );
        assert_eq!(c.handle_line(":n").unwrap(), Flow::Continue);
        assert_eq!(c.session().position(), 0);

        c.handle_line(":restart").unwrap();
        assert!(c.report().is_none());
        assert_eq!(c.session().answered_count(), 0);
        assert_eq!(c.view().rendered.last(), Some(&(1, None)));
    }

    #[test]
    fn unknown_command_and_bad_answer_are_retry_prompts() {
        let mut c = controller();
        c.handle_line(":jump").unwrap();
        assert!(last_feedback(&c).message.contains("unknown command"));

        c.handle_line("42").unwrap();
        assert!(last_feedback(&c).message.contains("between 1 and 4"));
        assert_eq!(c.session().answered_count(), 0);
    }

    #[test]
    fn help_and_quit() {
        let mut c = controller();
        assert_eq!(c.handle_line(":help").unwrap(), Flow::Continue);
        assert_eq!(c.view().help_shown, 1);
        assert_eq!(c.handle_line(":quit").unwrap(), Flow::Quit);
    }
}
