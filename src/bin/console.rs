use anyhow::Result;
use converse::handler::ProcessorHandler;
use converse::processor::primitive::unsigned_int;
use converse::processor::{
    ChoiceProcessor, Field, FormProcessor, InputProcessorExt, ListProcessor, OptionalProcessor,
    StringProcessor,
};
use converse::state::{ProcessorState, State, StaticState, Target};
use converse::{SessionRegistry, UserId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
enum MenuChoice {
    Register,
    Numbers,
    Quit,
}

#[derive(Debug)]
struct Registration {
    name: String,
    age: u32,
    email: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let default_user = UserId::from(
        std::env::var("CONVERSE_USER").unwrap_or_else(|_| Uuid::new_v4().to_string()),
    );

    let registry = SessionRegistry::new(|_| menu_state());

    info!(user_id = %default_user, "Reading lines from stdin, prefix with `<user>: ` to switch user");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let (user_id, text) = parse_line(&line, &default_user);
        debug!(user_id = %user_id, text = %text, "Inbound line");

        for response in registry.dispatch(&user_id, text) {
            println!("[{user_id}] {response}");
        }
    }

    info!(sessions = registry.session_count(), "Input closed");

    Ok(())
}

/// `alice: /add` speaks as `alice`, anything else as the default user.
fn parse_line<'a>(line: &'a str, default_user: &UserId) -> (UserId, &'a str) {
    match line.split_once(": ") {
        Some((user, text)) if !user.trim().is_empty() && !user.contains(char::is_whitespace) => {
            (UserId::from(user.trim()), text.trim())
        }
        _ => (default_user.clone(), line.trim()),
    }
}

fn menu_state() -> Box<dyn State> {
    let menu = ChoiceProcessor::new("What do you want to do?")
        .option("register", MenuChoice::Register)
        .option("numbers", MenuChoice::Numbers)
        .option("quit", MenuChoice::Quit);

    Box::new(
        ProcessorState::new(
            ProcessorHandler::accepting(menu),
            || Target::boxed(menu_state()),
            |choice| match choice {
                MenuChoice::Register => Target::boxed(register_state()),
                MenuChoice::Numbers => Target::boxed(numbers_state()),
                MenuChoice::Quit => {
                    Target::new(StaticState::new("quit", "Bye! There is nothing else to do."))
                }
            },
        )
        .named("menu"),
    )
}

fn register_state() -> Box<dyn State> {
    let form = FormProcessor::new((
        Field::new(StringProcessor::new("What's your name?").with_max_len(64)),
        Field::new(unsigned_int("How old are you?")),
        Field::new(OptionalProcessor::new(StringProcessor::new("What's your e-mail?"))),
    ))
    .map(|(name, age, email)| Registration { name, age, email });

    let handler = ProcessorHandler::fallible(form, |registration: &Registration| {
        (registration.age < 18).then(|| "You must be at least 18 to register.".to_string())
    });

    Box::new(
        ProcessorState::new(
            handler,
            || Target::boxed(menu_state()).with_message("Registration cancelled."),
            |registration| {
                info!(?registration, "Registered");
                let email = registration.email.as_deref().unwrap_or("no e-mail");
                Target::boxed(menu_state()).with_message(format!(
                    "Welcome {} ({}, {email}).",
                    registration.name, registration.age
                ))
            },
        )
        .named("register"),
    )
}

fn numbers_state() -> Box<dyn State> {
    let list = ListProcessor::new(
        "Send /add to add a number, /remove <index> to remove one, /finish when done.",
        unsigned_int("Insert a number."),
    )
    .with_item_formatter(u32::to_string);

    Box::new(
        ProcessorState::new(
            ProcessorHandler::accepting(list),
            || Target::boxed(menu_state()),
            |numbers| {
                let sum: u64 = numbers.iter().map(|n| u64::from(*n)).sum();
                Target::boxed(menu_state()).with_message(format!(
                    "You sent {} numbers adding up to {sum}.",
                    numbers.len()
                ))
            },
        )
        .named("numbers"),
    )
}
