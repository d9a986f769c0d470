//! Interactive terminal driver for the two suggestion wizards.

use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use dialoguer::{Input, MultiSelect, Select};
use tracing::{debug, info};

use crate::catalog::{self, TagField, FAMILY_RECIPIENT};
use crate::errors::GENERIC_FETCH_MESSAGE;
use crate::cli::Flow;
use crate::fetch::{ActivityFetcher, GiftFetcher, SuggestionFetcher};
use crate::form::{AnswerSet, BudgetBound, Field, StepKind, Wizard};
use crate::provider::DynProvider;
use crate::session::{FetchState, SuggestionSession};
use crate::ux;
use crate::wire::Suggestions;

/// What the user chose after the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Restart,
    Quit,
}

/// Mode selection, wizard, results; repeat until the user quits.
pub async fn run_interactive(provider: DynProvider, mut preset: Option<Flow>) -> Result<()> {
    let mut current: Option<Wizard> = None;
    loop {
        let flow = match preset.take() {
            Some(f) => f,
            None => match select_mode()? {
                Some(f) => f,
                None => return Ok(()),
            },
        };
        // A wizard that went through "New search" is already back at step 1.
        let wizard = match current.take() {
            Some(w) if w.flow() == flow => w,
            _ => Wizard::new(flow),
        };
        let wizard = current.insert(wizard);
        match run_wizard(wizard, provider.clone()).await? {
            Outcome::Restart => continue,
            Outcome::Quit => return Ok(()),
        }
    }
}

fn select_mode() -> Result<Option<Flow>> {
    ux::print_heading("Surprise time!");
    println!("Looking for a great gift, or want to plan an unforgettable moment together?");
    let choice = Select::new()
        .with_prompt("Choose a wizard")
        .items(&[
            "Gift Box: find a personal, meaningful gift",
            "Live the Moment: plan a great adventure together",
            "Quit",
        ])
        .default(0)
        .interact()?;
    Ok(match choice {
        0 => Some(Flow::Gift),
        1 => Some(Flow::Activity),
        _ => None,
    })
}

async fn run_wizard(wizard: &mut Wizard, provider: DynProvider) -> Result<Outcome> {
    let flow = wizard.flow();
    info!(flow = flow.as_str(), "wizard started");

    loop {
        let kind = wizard.step_kind();
        if wizard.step() > 1 && !wizard.is_final_step() {
            ux::print_progress(wizard.progress());
        }
        match kind {
            StepKind::Intro => {
                if !intro(flow)? {
                    return Ok(Outcome::Quit);
                }
                wizard.next_step();
                continue;
            }
            StepKind::BasicInfo => basic_info(wizard)?,
            StepKind::Personality => personality(wizard).await?,
            StepKind::Conditions => conditions(wizard)?,
            StepKind::EventDetails => event_details(wizard)?,
            StepKind::Notes => notes(wizard)?,
            StepKind::Results => return show_results(wizard, provider).await,
        }
        navigate(wizard)?;
    }
}

fn next_label(wizard: &Wizard) -> &'static str {
    match (wizard.step_kind(), wizard.flow()) {
        (StepKind::Notes, Flow::Gift) => "Get suggestions",
        (StepKind::Notes, Flow::Activity) => "Get activity suggestions",
        _ => "Next",
    }
}

fn navigate(wizard: &mut Wizard) -> Result<()> {
    let next = next_label(wizard);
    let items: Vec<&str> = if wizard.step() > 1 { vec![next, "Back"] } else { vec![next] };
    let choice = Select::new().items(&items).default(0).interact()?;
    if choice == 1 {
        wizard.prev_step();
    } else if wizard.can_advance() {
        wizard.next_step();
    } else {
        ux::print_error("Please fill in the required fields before continuing.");
    }
    debug!(step = wizard.step(), "navigated");
    Ok(())
}

fn intro(flow: Flow) -> Result<bool> {
    let (title, blurb, start) = match flow {
        Flow::Gift => (
            "Gift Box Wizard",
            "Let's find the most meaningful gift for your loved one. Follow a few steps and see gift box ideas made for them.",
            "Start",
        ),
        Flow::Activity => (
            "Memory Maker Wizard",
            "Let's plan unforgettable moments together. Tell us a little about the person and the event, and we'll map out experiences just for you.",
            "Start planning",
        ),
    };
    ux::print_heading(title);
    println!("{blurb}");
    let choice = Select::new().items(&[start, "Quit"]).default(0).interact()?;
    Ok(choice == 0)
}

/// Single choice, preselecting the current value when there is one.
fn choose(prompt: &str, options: &[&str], current: &str) -> Result<String> {
    let default = options.iter().position(|o| *o == current).unwrap_or(0);
    let idx = Select::new()
        .with_prompt(prompt)
        .items(options)
        .default(default)
        .interact()?;
    Ok(options[idx].to_string())
}

fn choose_tags(wizard: &mut Wizard, field: TagField, prompt: &str) -> Result<()> {
    let options = catalog::catalog_for(field);
    let current = wizard.answers().tags(field);
    let defaults: Vec<bool> = options.iter().map(|o| current.iter().any(|c| c == o)).collect();
    let picked = MultiSelect::new()
        .with_prompt(format!("{prompt} (space to select, enter to confirm)"))
        .items(options)
        .defaults(&defaults)
        .interact()?;
    let values: Vec<String> = picked.into_iter().map(|i| options[i].to_string()).collect();
    wizard.set_tags(field, &values)?;
    Ok(())
}

fn text(prompt: &str, current: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

fn basic_info(wizard: &mut Wizard) -> Result<()> {
    ux::print_heading("Basic Information");
    let a = wizard.answers().clone();
    wizard.set_field(Field::Gender, choose("Gender", catalog::GENDERS, &a.gender)?);
    wizard.set_field(Field::Age, choose("Age range", catalog::AGE_BRACKETS, &a.age)?);

    let mut professions = vec!["(skip)"];
    professions.extend_from_slice(catalog::PROFESSIONS);
    let profession = choose("Profession", &professions, &a.profession)?;
    wizard.set_field(Field::Profession, if profession == "(skip)" { String::new() } else { profession });

    let recipient = choose("Who is the gift for?", catalog::RECIPIENTS, &a.recipient)?;
    wizard.set_field(Field::Recipient, recipient.as_str());
    if recipient == FAMILY_RECIPIENT {
        wizard.set_field(
            Field::FamilyMember,
            choose("Which family member?", catalog::FAMILY_MEMBERS, &a.family_member)?,
        );
    }
    wizard.set_field(Field::Occasion, choose("Occasion", catalog::OCCASIONS, &a.occasion)?);
    Ok(())
}

async fn personality(wizard: &mut Wizard) -> Result<()> {
    ux::print_heading("Personality & Interests");
    photo(wizard).await?;
    choose_tags(wizard, TagField::Interests, "Interests")?;
    choose_tags(wizard, TagField::Styles, "Style")?;
    let color = text("Color preference (optional, e.g. blue, pastel tones)", &wizard.answers().color)?;
    wizard.set_field(Field::Color, color);
    Ok(())
}

async fn photo(wizard: &mut Wizard) -> Result<()> {
    println!("A photo is analysed to improve the suggestions and is not stored anywhere.");
    let has_photo = wizard.answers().image.is_some();
    let items: &[&str] = if has_photo {
        &["Keep photo", "Change photo", "Remove photo"]
    } else {
        &["No photo", "Choose photo"]
    };
    match Select::new().with_prompt("Photo (optional)").items(items).default(0).interact()? {
        1 => {
            let path = text("Path to image file", "")?;
            if path.is_empty() {
                return Ok(());
            }
            if let Err(e) = wizard.load_image(Path::new(&path)).await {
                ux::print_error(&e.to_string());
            }
        }
        2 => wizard.clear_image(),
        _ => {}
    }
    Ok(())
}

fn budget_input(prompt: &str, current: Option<u64>) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(current.map(|v| v.to_string()).unwrap_or_default())
        .allow_empty(true)
        .validate_with(|s: &String| -> std::result::Result<(), String> {
            let t = s.trim();
            if t.is_empty() || t.parse::<u64>().is_ok() {
                Ok(())
            } else {
                Err("enter a whole number or leave empty".into())
            }
        })
        .interact_text()?;
    Ok(value)
}

fn conditions(wizard: &mut Wizard) -> Result<()> {
    ux::print_heading("Conditions & Constraints");
    choose_tags(wizard, TagField::GiftType, "Gift type")?;
    let budget = wizard.answers().budget.clone();
    let min = budget_input("Minimum budget (TL)", budget.min)?;
    wizard.set_budget_text(BudgetBound::Min, &min)?;
    let max = budget_input("Maximum budget (TL)", budget.max)?;
    wizard.set_budget_text(BudgetBound::Max, &max)?;
    Ok(())
}

/// Dates must be `YYYY-MM-DD` and not in the past.
pub fn validate_event_date(s: &str, today: NaiveDate) -> std::result::Result<(), String> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| "use the YYYY-MM-DD format".to_string())?;
    if date < today {
        return Err("the date cannot be in the past".into());
    }
    Ok(())
}

fn event_details(wizard: &mut Wizard) -> Result<()> {
    ux::print_heading("Event Details");
    println!("Where and when will the experience take place?");
    let city = text("City (e.g. Istanbul, Izmir, Ankara)", &wizard.answers().city)?;
    wizard.set_field(Field::City, city);
    let today = Local::now().date_naive();
    let date: String = Input::new()
        .with_prompt("Date (YYYY-MM-DD)")
        .with_initial_text(wizard.answers().date.clone())
        .validate_with(move |s: &String| validate_event_date(s, today))
        .interact_text()?;
    wizard.set_field(Field::Date, date.trim());
    Ok(())
}

fn notes(wizard: &mut Wizard) -> Result<()> {
    ux::print_heading("Optional Note");
    println!("A small memory, a hint, or a few words that describe them.");
    let notes = text(
        "Describes them best (e.g. drinks coffee every morning, loves cats)",
        &wizard.answers().notes,
    )?;
    wizard.set_field(Field::Notes, notes);
    Ok(())
}

/// Fetch with a spinner; `Err` carries the user-facing message.
async fn fetch_with_spinner<F>(
    fetcher: &F,
    answers: &AnswerSet,
    label: &str,
) -> std::result::Result<Suggestions<F::Item>, String>
where
    F: SuggestionFetcher,
{
    let mut session = SuggestionSession::new();
    let pb = ux::spinner(label);
    session.run(fetcher, answers).await;
    pb.finish_and_clear();
    match session.into_state() {
        FetchState::Success(data) => Ok(data),
        FetchState::Error(msg) => Err(msg),
        FetchState::Loading => Err(GENERIC_FETCH_MESSAGE.to_string()),
    }
}

async fn show_results(wizard: &mut Wizard, provider: DynProvider) -> Result<Outcome> {
    match wizard.flow() {
        Flow::Gift => {
            let fetcher = GiftFetcher::new(provider);
            results_screen(&fetcher, wizard, "Preparing the best gifts for you...", ux::print_gift_results).await
        }
        Flow::Activity => {
            let fetcher = ActivityFetcher::new(provider);
            results_screen(&fetcher, wizard, "Planning unforgettable moments...", ux::print_activity_results).await
        }
    }
}

/// Fetch, show cards or the error, then offer a fresh search.
async fn results_screen<F>(
    fetcher: &F,
    wizard: &mut Wizard,
    label: &str,
    print: fn(&Suggestions<F::Item>),
) -> Result<Outcome>
where
    F: SuggestionFetcher,
{
    let mut session = SuggestionSession::new();
    let pb = ux::spinner(label);
    let state = session.run(fetcher, wizard.answers()).await;
    pb.finish_and_clear();

    let items: &[&str] = match state {
        FetchState::Success(data) => {
            print(data);
            &["New search", "Quit"]
        }
        FetchState::Error(msg) => {
            ux::print_error(msg);
            &["Start over", "Quit"]
        }
        FetchState::Loading => {
            ux::print_error(GENERIC_FETCH_MESSAGE);
            &["Start over", "Quit"]
        }
    };
    let choice = Select::new().items(items).default(0).interact()?;
    if choice != 0 {
        return Ok(Outcome::Quit);
    }
    session.invalidate();
    wizard.restart();
    Ok(Outcome::Restart)
}

/// Non-interactive run: fetch once for the given answers and print the cards.
pub async fn run_batch(flow: Flow, answers: AnswerSet, provider: DynProvider) -> Result<()> {
    let missing = answers.missing_required(flow);
    if !missing.is_empty() {
        return Err(anyhow!("answer set is missing required fields: {}", missing.join(", ")));
    }
    if flow == Flow::Activity {
        validate_event_date(&answers.date, Local::now().date_naive())
            .map_err(|e| anyhow!("invalid date {:?}: {e}", answers.date))?;
    }
    let wizard = Wizard::from_answers(flow, answers);
    let answers = wizard.answers();
    let result = match flow {
        Flow::Gift => fetch_with_spinner(&GiftFetcher::new(provider), answers, "Fetching gift suggestions...")
            .await
            .map(|d| ux::print_gift_results(&d)),
        Flow::Activity => fetch_with_spinner(&ActivityFetcher::new(provider), answers, "Fetching activity suggestions...")
            .await
            .map(|d| ux::print_activity_results(&d)),
    };
    result.map_err(|msg| anyhow!(msg))
}
