use crate::models::{Difficulty, Question};
use std::fs;
use std::path::{Path, PathBuf};

pub const LAW_CATEGORIES: [&str; 12] = [
    "Constitutional Law",
    "Criminal Law",
    "Law of Contract",
    "Law of Tort",
    "Land Law",
    "Law of Evidence",
    "Family Law",
    "Company Law",
    "Administrative Law",
    "Equity and Trusts",
    "Jurisprudence",
    "Legal Methods",
];

const OPTION_SEPARATOR: char = '|';
const FIELD_COUNT: usize = 7;

#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("Failed to read question deck: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path}:{line}: {reason}")]
    Parse {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("{path}:{line}: answer {answer:?} is not one of the options")]
    InvariantViolation {
        path: String,
        line: usize,
        answer: String,
    },
}

fn q(
    id: u32,
    prompt: &str,
    options: [&str; 4],
    answer: &str,
    explanation: &str,
    category: &str,
    difficulty: Difficulty,
) -> Question {
    Question {
        id,
        prompt: prompt.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        answer: answer.to_string(),
        explanation: explanation.to_string(),
        category: category.to_string(),
        difficulty,
    }
}

/// The bundled question bank, in display order.
pub fn builtin_questions() -> Vec<Question> {
    vec![
        q(
            1,
            "Which section of the 1999 Nigerian Constitution guarantees the Right to Fair Hearing?",
            ["Section 33", "Section 35", "Section 36", "Section 38"],
            "Section 36",
            "Section 36 CFRN 1999 guarantees the right to fair hearing, including the right to be informed of charges, to defend oneself, and to be presumed innocent until proven guilty.",
            "Constitutional Law",
            Difficulty::Easy,
        ),
        q(
            2,
            "In Donoghue v Stevenson [1932], Lord Atkin established which foundational principle?",
            [
                "The felony-murder rule",
                "The neighbour principle in negligence",
                "The doctrine of frustration",
                "The parol evidence rule",
            ],
            "The neighbour principle in negligence",
            "Lord Atkin established the 'neighbour principle': you must take reasonable care to avoid acts that you can reasonably foresee would injure your neighbour (persons closely and directly affected by your actions). This forms the basis of the modern law of negligence.",
            "Law of Tort",
            Difficulty::Easy,
        ),
        q(
            3,
            "Under the Land Use Act 1978, who has the power to grant statutory rights of occupancy in urban areas?",
            [
                "Local Government Chairman",
                "President of Nigeria",
                "Governor of the State",
                "Minister of Works and Housing",
            ],
            "Governor of the State",
            "Section 5 of the Land Use Act 1978 vests the power to grant statutory rights of occupancy over land in urban areas in the Governor of each State, who holds all land in trust for all Nigerians.",
            "Land Law",
            Difficulty::Easy,
        ),
        q(
            4,
            "What is the legal doctrine established in Carlill v Carbolic Smoke Ball Co [1893] regarding advertisements?",
            [
                "Advertisements are always invitations to treat",
                "Advertisements can be binding unilateral offers if sufficiently certain",
                "Advertisements must be in writing to be binding",
                "Advertisements require consideration to be binding",
            ],
            "Advertisements can be binding unilateral offers if sufficiently certain",
            "The Court of Appeal held that the advertisement promising £100 was sufficiently specific and showed genuine intention to be bound (backed by a £1,000 deposit in a bank). Advertisements can therefore constitute unilateral offers capable of binding acceptance by performance.",
            "Law of Contract",
            Difficulty::Medium,
        ),
        q(
            5,
            "The principle in Rylands v Fletcher [1868] imposes what type of liability?",
            [
                "Fault-based liability",
                "Strict liability",
                "Vicarious liability",
                "Statutory liability",
            ],
            "Strict liability",
            "A person who accumulates on their land something likely to do mischief if it escapes must keep it at their peril. There is no need to prove fault or negligence: the escape and resultant damage is sufficient.",
            "Law of Tort",
            Difficulty::Medium,
        ),
    ]
}

/// Distinct categories present in `questions`, in first-appearance order.
pub fn categories_in(questions: &[Question]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for question in questions {
        if !categories.contains(&question.category) {
            categories.push(question.category.clone());
        }
    }
    categories
}

pub fn get_deck_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            if let Some(ext) = entry.path().extension()
                && ext == "csv"
            {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    files
}

/// Loads one CSV deck. The whole file is rejected on its first bad row.
pub fn load_deck(path: &Path) -> Result<Vec<Question>, BankError> {
    let content = fs::read_to_string(path)?;
    parse_deck(&content, &path.display().to_string())
}

pub fn parse_deck(content: &str, source: &str) -> Result<Vec<Question>, BankError> {
    let mut questions = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() || line.starts_with("id,") {
            continue;
        }
        questions.push(parse_question_row(line, source, line_no)?);
    }

    Ok(questions)
}

fn parse_question_row(line: &str, source: &str, line_no: usize) -> Result<Question, BankError> {
    let parse_err = |reason: String| BankError::Parse {
        path: source.to_string(),
        line: line_no,
        reason,
    };

    let fields = parse_csv_line(line);
    if fields.len() != FIELD_COUNT {
        return Err(parse_err(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            fields.len()
        )));
    }

    let id = fields[0]
        .trim()
        .parse::<u32>()
        .map_err(|e| parse_err(format!("invalid id {:?}: {}", fields[0], e)))?;

    let options: Vec<String> = fields[2]
        .split(OPTION_SEPARATOR)
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();
    if options.len() < 2 {
        return Err(parse_err("a question needs at least two options".to_string()));
    }

    let difficulty = Difficulty::parse(&fields[6])
        .ok_or_else(|| parse_err(format!("unknown difficulty {:?}", fields[6])))?;

    let question = Question {
        id,
        prompt: fields[1].trim().to_string(),
        options,
        answer: fields[3].trim().to_string(),
        explanation: fields[4].trim().to_string(),
        category: fields[5].trim().to_string(),
        difficulty,
    };

    if question.prompt.is_empty() || question.category.is_empty() {
        return Err(parse_err("prompt and category must not be empty".to_string()));
    }

    if !question.answer_in_options() {
        return Err(BankError::InvariantViolation {
            path: source.to_string(),
            line: line_no,
            answer: question.answer,
        });
    }

    Ok(question)
}

/// Splits one CSV record. Quoted fields may contain commas and `""` escapes.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut chars = line.chars().peekable();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes && current.is_empty() => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(current);
    fields
}

/// The built-in bank followed by every valid extra deck in `dir`.
/// Decks that fail validation are skipped and reported.
pub fn load_bank(dir: &Path) -> (Vec<Question>, Vec<BankError>) {
    let mut questions = builtin_questions();
    let mut errors = Vec::new();

    for path in get_deck_files(dir) {
        match load_deck(&path) {
            Ok(deck) => {
                crate::logger::log(&format!(
                    "Loaded {} questions from {}",
                    deck.len(),
                    path.display()
                ));
                questions.extend(deck);
            }
            Err(e) => {
                crate::logger::log(&format!("Rejected question deck: {}", e));
                errors.push(e);
            }
        }
    }

    (questions, errors)
}
