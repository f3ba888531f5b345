use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use delta_client::api::{DeltaApi, HttpTransport};
use delta_client::config::ClientConfig;
use delta_client::notify::{Notifier, TerminalNotifier};
use delta_client::onboarding::SubmissionPipeline;
use delta_client::pages::{Page, PageContent, Pages};
use delta_client::session::Session;
use delta_client::views::{LinkedInView, ResumeView};
use delta_client::wizard::{FieldKind, FieldSpec, ImageFile, PrimaryAction, Wizard};

type Input = Lines<BufReader<Stdin>>;

/// What the user did at a field prompt.
enum Entry {
    Value,
    Back,
    Quit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ClientConfig::from_env()?;

    eprintln!("Delta v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: {}", config.api_base_url);
    eprintln!("   Type \"back\" to return to the previous step, \"quit\" to exit.\n");

    let api = DeltaApi::new(Arc::new(HttpTransport::new(&config)?));
    let session = Session::new();
    let (notifier, mut nav_rx) = TerminalNotifier::new();
    let notifier = Arc::new(notifier);
    let pipeline = SubmissionPipeline::new(
        api.clone(),
        session.clone(),
        notifier.clone(),
        config.clone(),
    );
    let pages = Pages::new(api, session, notifier.clone(), config);

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut wizard = Wizard::default();

    loop {
        if !run_wizard(&mut wizard, &mut input, notifier.as_ref()).await? {
            return Ok(());
        }
        match pipeline.submit(&wizard).await {
            Ok(_) => break,
            Err(_) => {
                let again = prompt(&mut input, "Try again? [y/N] ").await?;
                if !matches!(again.as_deref().map(str::trim), Some("y" | "yes")) {
                    return Ok(());
                }
            }
        }
    }

    let mut page = nav_rx.recv().await.unwrap_or(Page::Roadmap);
    loop {
        match pages.load_page(page).await {
            Ok(content) => print_page(&content),
            Err(e) => eprintln!("{e}"),
        }

        let Some(line) = prompt(&mut input, "\nroadmap | progress | profile | download <path> | quit > ").await?
        else {
            return Ok(());
        };
        let line = line.trim();
        if line == "quit" {
            return Ok(());
        }
        if let Some(path) = line.strip_prefix("download ") {
            if let Err(e) = pages.download_resume(Path::new(path.trim())).await {
                eprintln!("{e}");
            }
            continue;
        }
        match line.parse() {
            Ok(next) => page = next,
            Err(e) => eprintln!("{e}"),
        }
    }
}

/// Drive the wizard to its last step. Returns `false` if the user quit.
async fn run_wizard(
    wizard: &mut Wizard,
    input: &mut Input,
    notifier: &dyn Notifier,
) -> anyhow::Result<bool> {
    loop {
        let view = wizard.step_view();
        let Some(step) = wizard.current_step_spec().cloned() else {
            return Ok(true);
        };
        eprintln!("\nStep {}/{}: {}", view.step, view.total_steps, step.title);

        let mut went_back = false;
        for field in &step.fields {
            if !wizard.is_visible(field.name) {
                continue;
            }
            match prompt_field(wizard, field, input, notifier).await? {
                Entry::Value => {}
                Entry::Back => {
                    wizard.retreat();
                    went_back = true;
                    break;
                }
                Entry::Quit => return Ok(false),
            }
        }
        if went_back {
            continue;
        }

        if wizard.advance(notifier).is_ok() && view.primary == PrimaryAction::Submit {
            return Ok(true);
        }
    }
}

async fn prompt_field(
    wizard: &mut Wizard,
    field: &FieldSpec,
    input: &mut Input,
    notifier: &dyn Notifier,
) -> anyhow::Result<Entry> {
    loop {
        let marker = if wizard.is_required(field.name) { " *" } else { "" };
        let hint = match &field.kind {
            FieldKind::Select { options } => format!(" [{}]", options.join("/")),
            FieldKind::Range { min, max, .. } => format!(" [{min}-{max}]"),
            FieldKind::Number { min, max } => format!(" ({min}-{max})"),
            FieldKind::Toggle => " [y/n]".to_string(),
            FieldKind::Image => " (file path, blank to skip)".to_string(),
            _ => String::new(),
        };

        let Some(line) = prompt(input, &format!("{}{marker}{hint}: ", field.label)).await? else {
            return Ok(Entry::Quit);
        };
        let line = line.trim();
        match line {
            "back" => return Ok(Entry::Back),
            "quit" => return Ok(Entry::Quit),
            _ => {}
        }

        match &field.kind {
            FieldKind::Toggle => {
                wizard.set_toggle(field.name, matches!(line, "y" | "yes"))?;
            }
            FieldKind::Range { .. } => {
                if !line.is_empty() {
                    let Ok(years) = line.parse::<u32>() else {
                        eprintln!("   Enter a whole number");
                        continue;
                    };
                    wizard.set_horizon(years);
                }
                eprintln!("   {}", wizard.horizon_label());
            }
            FieldKind::Image => {
                if !line.is_empty() {
                    match ImageFile::from_path(Path::new(line)).await {
                        Ok(file) => {
                            if wizard.upload_image(field.name, &file, notifier).is_err() {
                                continue;
                            }
                        }
                        Err(e) => {
                            eprintln!("   Could not read {line}: {e}");
                            continue;
                        }
                    }
                }
            }
            _ => wizard.set_text(field.name, line)?,
        }
        return Ok(Entry::Value);
    }
}

/// Print `label` and read one line. `None` at end of input.
async fn prompt(input: &mut Input, label: &str) -> anyhow::Result<Option<String>> {
    let mut stderr = tokio::io::stderr();
    stderr.write_all(label.as_bytes()).await?;
    stderr.flush().await?;
    Ok(input.next_line().await?)
}

fn print_page(content: &PageContent) {
    match content {
        PageContent::Onboarding => eprintln!("Onboarding complete."),
        PageContent::Roadmap(page) => {
            let month = &page.month;
            println!("\n== {} ==", month.title);
            println!("{}", month.focus);
            if let Some(tip) = &month.motivation {
                println!("{tip}");
            }
            for task in &month.tasks {
                let mark = if task.completed { "x" } else { " " };
                println!("  [{mark}] {} ({})", task.item_name, task.item_type);
            }
            println!(
                "  {}/{} done | {}% projects | {} pace",
                month.completed, month.total, month.preferences.project_ratio, month.preferences.pace
            );

            for phase in &page.phases {
                let marker = if phase.current { " <- current" } else { "" };
                println!("\n{} | {}{marker}", phase.badge, phase.title);
                println!("  Focus: {}", phase.focus);
                if let Some(notice) = phase.locked_notice {
                    println!("  {notice}");
                    continue;
                }
                for section in &phase.sections {
                    println!("  {}", section.title);
                    for item in &section.items {
                        println!("    - {} [{}]", item.name, item.status.label());
                        println!("      {}", item.details);
                    }
                }
            }
        }
        PageContent::Progress(page) => {
            let s = &page.summary;
            println!(
                "\n{}% complete ({} done, {} in progress, {} not started, {} total)",
                s.percentage, s.completed, s.in_progress, s.not_started, s.total
            );
            for task in &page.tasks {
                println!(
                    "  {} | {} | {} | {}",
                    task.month, task.item_type, task.name, task.status_label
                );
            }
        }
        PageContent::Profile(page) => {
            match &page.resume {
                ResumeView::Pending => println!("\nResume is still being prepared."),
                ResumeView::Ready { name, sections, .. } => {
                    println!("\n{name}");
                    println!("{}", page.resume.contact_line());
                    for section in sections {
                        println!("  {}", section.title());
                    }
                }
            }
            if let LinkedInView::Suggestions {
                profile_summary: Some(summary),
                ..
            } = &page.linkedin
            {
                println!("\nLinkedIn: {summary}");
            }
        }
    }
}
