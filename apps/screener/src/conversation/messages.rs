//! Candidate-facing text for each stage.

use crate::models::profile::CandidateProfile;
use crate::models::question::QuestionRecord;

pub fn opening(company: &str, retention_days: u32) -> String {
    format!(
        "Welcome to the {company} hiring assistant!\n\n\
        I'll ask you a few questions to learn about your background and technical skills. \
        This takes about 5-10 minutes and covers:\n\
        - Basic contact information\n\
        - Your years of experience and technology stack\n\
        - A few technical questions about the technologies you choose\n\n\
        {notice}\n\n\
        Do you consent to the collection and processing of your data as described? (yes/no)",
        notice = privacy_notice(company, retention_days)
    )
}

fn privacy_notice(company: &str, retention_days: u32) -> String {
    format!(
        "Privacy notice:\n\
        - Data collected: name, email, phone number, years of experience, technology skills and your answers.\n\
        - Usage: only to assess your technical qualifications and match you with relevant roles at {company}.\n\
        - Security: identifiers are hashed before they are written to any log.\n\
        - Retention: your data is kept for at most {retention_days} days and then deleted.\n\
        - Your rights: type 'delete my data' at any time to end the conversation and have your data removed."
    )
}

pub fn consent_reprompt() -> String {
    "Please answer 'yes' to consent and continue, or 'no' to leave.".to_string()
}

pub fn ask_name() -> String {
    "Thank you for your consent! Let's start with the basics.\n\nPlease provide your full name:"
        .to_string()
}

pub fn ask_email(name: &str) -> String {
    format!("Nice to meet you, {name}! Please provide your email address:")
}

pub fn ask_phone() -> String {
    "Great! Now please provide your phone number:".to_string()
}

pub fn ask_experience() -> String {
    "Excellent! How many years of professional experience do you have? (Enter a number)"
        .to_string()
}

pub fn ask_tech_stack(max_technologies: usize) -> String {
    format!(
        "Now let's talk about your technical skills.\n\n\
        List the languages, frameworks and tools you work with, optionally with your level \
        (beginner, intermediate or advanced), e.g. \"Python: advanced, React: beginner\". \
        You can add up to {max_technologies} technologies. Type 'done' when you're finished."
    )
}

pub fn tech_added(names: &[String], remaining: usize) -> String {
    format!(
        "Added: {}. Add more technologies ({remaining} left) or type 'done' to start the technical questions.",
        names.join(", ")
    )
}

pub fn tech_needed() -> String {
    "Please add at least one technology before finishing.".to_string()
}

pub fn question(
    record: &QuestionRecord,
    display_technology: &str,
    question_index: usize,
    question_count: usize,
    technology_index: usize,
    technology_count: usize,
) -> String {
    format!(
        "Question {} of {} ({}), technology {} of {}\n\n{}\n\nPlease provide your answer:",
        question_index + 1,
        question_count,
        display_technology.to_uppercase(),
        technology_index + 1,
        technology_count,
        record.text
    )
}

pub fn summary(profile: &CandidateProfile, company: &str) -> String {
    let name = profile.name.as_deref().unwrap_or("Candidate");
    let years = profile
        .years_experience
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let technologies = profile
        .technologies
        .iter()
        .map(|t| format!("{} ({})", t.name, t.level.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    let email = profile.email.as_deref().unwrap_or("your email");

    format!(
        "Congratulations, {name}! You've completed the {company} technical screening.\n\n\
        Summary:\n\
        - Experience: {years} years\n\
        - Technologies: {technologies}\n\
        - Questions answered: {answered}\n\n\
        What happens next:\n\
        1. Our technical team will review your responses.\n\
        2. We'll match your profile with suitable opportunities.\n\
        3. You'll hear from us within 2-3 business days at {email}.\n\n\
        Thank you for your time!",
        answered = profile.exchanges.len()
    )
}

pub fn consent_declined(company: &str) -> String {
    format!(
        "No problem. We haven't collected any of your data. \
        Thank you for your interest in {company}, and have a great day!"
    )
}

pub fn validation_failed(reason: &str) -> String {
    format!(
        "We couldn't verify your details ({reason}), so this session has ended. \
        Please start a new session when you're ready to try again."
    )
}

pub fn timed_out() -> String {
    "Your session expired due to inactivity. Please start a new session to continue.".to_string()
}

pub fn withdrawn(deletion_requested: bool) -> String {
    if deletion_requested {
        "Your session has ended and your data has been marked for immediate deletion. \
        Thank you for your time."
            .to_string()
    } else {
        "Your session has ended. If you'd like to complete the screening later, \
        please start a new session. Have a great day!"
            .to_string()
    }
}
