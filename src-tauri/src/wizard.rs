use std::{
    collections::VecDeque,
    io::{BufRead, Write},
};

use crate::{
    app_spec::AppSpec,
    desktop_entry::ShortcutOptions,
    error::{ShellError, ShellResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    pub fn supports_shortcuts(self) -> bool {
        matches!(self, Self::Linux)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    Title,
    Url,
    Icon,
    UseTrayIcon,
    MinimizeToTray,
    StartHidden,
    MinimizeOnClose,
    PersistWindowAppearance,
    Categories,
}

impl Question {
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Title => "Enter Name of Application: ",
            Self::Url => "Enter URL: ",
            Self::Icon => "Enter path to icon (or enter for none): ",
            Self::UseTrayIcon => "Do you wish to use a tray icon? [y/N]: ",
            Self::MinimizeToTray => "Do you wish to minimize to the tray? [y/N]: ",
            Self::StartHidden => "Do you wish to start hidden? [Y/n]: ",
            Self::MinimizeOnClose => {
                "Do you wish the close button to minimize the app instead? [y/N]: "
            }
            Self::PersistWindowAppearance => {
                "Do you wish to persist the window appearance between sessions? [Y/n]: "
            }
            Self::Categories => {
                "What categories do you want the shortcut to display in? (semi-colon delimited list): "
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YesNo {
    Yes,
    No,
    Unspecified,
}

fn parse_yes_no(answer: &str) -> YesNo {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => YesNo::Yes,
        "n" | "no" => YesNo::No,
        _ => YesNo::Unspecified,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardOutcome {
    pub spec: AppSpec,
    pub shortcut: ShortcutOptions,
}

#[derive(Debug)]
pub struct Wizard {
    queue: VecDeque<Question>,
    spec: AppSpec,
    shortcut: ShortcutOptions,
}

impl Wizard {
    pub fn new(platform: Platform) -> Self {
        let mut queue = VecDeque::from([
            Question::Title,
            Question::Url,
            Question::Icon,
            Question::UseTrayIcon,
            Question::MinimizeOnClose,
            Question::PersistWindowAppearance,
        ]);
        if platform.supports_shortcuts() {
            queue.push_back(Question::Categories);
        }
        Self {
            queue,
            spec: AppSpec::default(),
            shortcut: ShortcutOptions::default(),
        }
    }

    pub fn current_question(&self) -> Option<Question> {
        self.queue.front().copied()
    }

    pub fn next_prompt(&self) -> Option<&'static str> {
        self.current_question().map(Question::prompt)
    }

    pub fn is_done(&self) -> bool {
        self.queue.is_empty()
    }

    /// Validates and stores `raw` for the current question. On error the
    /// question is kept so the caller can ask it again.
    pub fn answer(&mut self, raw: &str) -> Result<(), String> {
        let Some(question) = self.current_question() else {
            return Ok(());
        };
        let answer = raw.trim();

        match question {
            Question::Title => {
                if answer.is_empty() {
                    return Err("Application name required".to_string());
                }
                self.spec.title = answer.to_string();
            }
            Question::Url => {
                if answer.is_empty() {
                    return Err("URL required".to_string());
                }
                self.spec.url = answer.to_string();
            }
            Question::Icon => {
                if !answer.is_empty() {
                    self.spec.icon = Some(answer.to_string());
                }
            }
            Question::UseTrayIcon => {
                if parse_yes_no(answer) == YesNo::Yes {
                    self.spec.use_tray_icon = true;
                    self.queue.push_back(Question::MinimizeToTray);
                    self.queue.push_back(Question::StartHidden);
                }
            }
            Question::MinimizeToTray => {
                if parse_yes_no(answer) == YesNo::Yes {
                    self.spec.minimize_to_tray = true;
                }
            }
            Question::StartHidden => {
                if parse_yes_no(answer) == YesNo::No {
                    self.spec.start_hidden = Some(false);
                }
            }
            Question::MinimizeOnClose => {
                if parse_yes_no(answer) == YesNo::Yes {
                    self.spec.minimize_on_close = true;
                }
            }
            Question::PersistWindowAppearance => {
                if parse_yes_no(answer) != YesNo::No {
                    self.spec.persist_window_appearance = true;
                }
            }
            Question::Categories => {
                self.shortcut.categories = Some(answer.to_string());
            }
        }

        self.queue.pop_front();
        Ok(())
    }

    pub fn finish(self) -> WizardOutcome {
        WizardOutcome {
            spec: self.spec,
            shortcut: self.shortcut,
        }
    }
}

pub fn run_wizard<R, W>(
    mut input: R,
    output: &mut W,
    platform: Platform,
) -> ShellResult<WizardOutcome>
where
    R: BufRead,
    W: Write,
{
    let mut wizard = Wizard::new(platform);
    let mut line = String::new();

    while let Some(prompt) = wizard.next_prompt() {
        write!(output, "{prompt}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Err(ShellError::InputClosed);
        }
        if let Err(message) = wizard.answer(&line) {
            writeln!(output, "{message}")?;
        }
    }

    Ok(wizard.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(answers: &str, platform: Platform) -> (ShellResult<WizardOutcome>, String) {
        let mut output = Vec::new();
        let result = run_wizard(answers.as_bytes(), &mut output, platform);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn defaults_only_persist_window_appearance() {
        let (result, _) = run("Mail\nhttps://mail.example.com\n\n\n\n\n", Platform::Other);
        let outcome = result.unwrap();
        assert_eq!(
            outcome.spec,
            AppSpec {
                title: "Mail".to_string(),
                url: "https://mail.example.com".to_string(),
                persist_window_appearance: true,
                ..AppSpec::default()
            }
        );
        assert_eq!(outcome.shortcut.categories, None);
    }

    #[test]
    fn empty_required_answers_are_asked_again() {
        let (result, output) = run(
            "\n  \nMail\n\nhttps://mail.example.com\n\nn\nn\nn\n",
            Platform::Other,
        );
        let outcome = result.unwrap();
        assert_eq!(outcome.spec.title, "Mail");
        assert_eq!(outcome.spec.url, "https://mail.example.com");
        assert_eq!(output.matches("Enter Name of Application: ").count(), 3);
        assert_eq!(output.matches("Application name required").count(), 2);
        assert_eq!(output.matches("Enter URL: ").count(), 2);
        assert_eq!(output.matches("URL required").count(), 1);
    }

    #[test]
    fn declining_tray_icon_skips_follow_ups() {
        let (result, output) = run("Mail\nhttps://m\n\nno\n\n\n", Platform::Other);
        let outcome = result.unwrap();
        assert!(!outcome.spec.use_tray_icon);
        assert!(!output.contains("minimize to the tray"));
        assert!(!output.contains("start hidden"));
    }

    #[test]
    fn accepting_tray_icon_appends_follow_ups_at_the_end() {
        let mut wizard = Wizard::new(Platform::Linux);
        for answer in ["Mail", "https://m", "/icons/mail.png", "Y"] {
            wizard.answer(answer).unwrap();
        }
        let remaining: Vec<_> = wizard.queue.iter().copied().collect();
        assert_eq!(
            remaining,
            vec![
                Question::MinimizeOnClose,
                Question::PersistWindowAppearance,
                Question::Categories,
                Question::MinimizeToTray,
                Question::StartHidden,
            ]
        );

        for answer in ["yes", "no", "Network;Email", "y", "n"] {
            wizard.answer(answer).unwrap();
        }
        assert!(wizard.is_done());
        let outcome = wizard.finish();
        assert_eq!(
            outcome.spec,
            AppSpec {
                title: "Mail".to_string(),
                url: "https://m".to_string(),
                icon: Some("/icons/mail.png".to_string()),
                use_tray_icon: true,
                minimize_to_tray: true,
                start_hidden: Some(false),
                minimize_on_close: true,
                persist_window_appearance: false,
            }
        );
        assert_eq!(outcome.shortcut.categories.as_deref(), Some("Network;Email"));
    }

    #[test]
    fn failed_answer_keeps_current_question() {
        let mut wizard = Wizard::new(Platform::Other);
        assert!(wizard.answer("   ").is_err());
        assert_eq!(wizard.current_question(), Some(Question::Title));
    }

    #[test]
    fn closed_input_is_an_error() {
        let (result, _) = run("Mail\n", Platform::Other);
        assert!(matches!(result, Err(ShellError::InputClosed)));
    }

    #[test]
    fn categories_are_only_asked_on_linux() {
        assert!(!Wizard::new(Platform::Other)
            .queue
            .contains(&Question::Categories));
        assert_eq!(
            Wizard::new(Platform::Linux).queue.back(),
            Some(&Question::Categories)
        );
    }
}
