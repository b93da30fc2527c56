use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
    pub category: String,
    pub difficulty: Difficulty,
}

impl Question {
    pub fn is_correct(&self, option: &str) -> bool {
        option == self.answer
    }

    /// The answer must be one of the options. A miss is an authoring bug in the bank.
    pub fn answer_in_options(&self) -> bool {
        self.options.iter().any(|o| o == &self.answer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => &question.category == name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Category(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Self-identified role chosen during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Student,
    Graduate,
    Lawyer,
    Lecturer,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Student,
        UserRole::Graduate,
        UserRole::Lawyer,
        UserRole::Lecturer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Graduate => "graduate",
            UserRole::Lawyer => "lawyer",
            UserRole::Lecturer => "lecturer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        UserRole::ALL.into_iter().find(|r| r.as_str() == s)
    }

    pub fn title(&self) -> &'static str {
        match self {
            UserRole::Student => "Law Student",
            UserRole::Graduate => "Recent Graduate",
            UserRole::Lawyer => "Legal Professional",
            UserRole::Lecturer => "Legal Educator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UserRole::Student => "Undergraduate or NLS aspirant.",
            UserRole::Graduate => "Awaiting call or job hunting.",
            UserRole::Lawyer => "Practicing advocate or solicitor.",
            UserRole::Lecturer => "Sharing knowledge with next gen.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Onboarding,
    Browse,
    Quiz,
    QuizQuitConfirm,
    Results,
}
