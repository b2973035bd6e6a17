//! Interviewer card commands: list, show, create, edit, delete.
//!
//! `edit` and `delete` drive [`InterviewerCard`] exactly as a graphical
//! dashboard would: open the form, change the draft, save; or request,
//! confirm, delete.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use persona_core::card::{AudioPlayer, Dimension, InterviewerApi, InterviewerCard, RefreshBus, RefreshEvent};
use persona_infra::dashboard::audio::SystemAudioPlayer;
use persona_infra::dashboard::client::HttpInterviewerApi;
use persona_types::catalog::{AUDIO_OPTIONS, AVATAR_OPTIONS, audio_by_value, avatar_by_id};
use persona_types::config::DashboardConfig;
use persona_types::interviewer::{Interviewer, InterviewerId, NewInterviewer, from_slider, to_slider};

use super::{CreateArgs, EditArgs};

fn spinner(message: impl Into<String>, color: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template(&format!("{{spinner:.{color}}} {{msg}}"))?);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

fn voice_label(audio: Option<&str>) -> String {
    match audio.filter(|a| !a.is_empty()) {
        Some(value) => audio_by_value(value)
            .map(|option| option.label.to_string())
            .unwrap_or_else(|| value.to_string()),
        None => "-".to_string(),
    }
}

/// Ten-cell bar for a 0-1 slider value.
fn slider_bar(value: f64) -> String {
    let filled = (value * 10.0).round().clamp(0.0, 10.0) as usize;
    format!("{}{} {value:.1}", "█".repeat(filled), "░".repeat(10 - filled))
}

/// List all interviewers as a table of cards.
pub async fn list_interviewers(api: &HttpInterviewerApi, json: bool) -> Result<()> {
    let interviewers = api.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&interviewers)?);
        return Ok(());
    }

    if interviewers.is_empty() {
        println!();
        println!(
            "  {} No interviewers found. Create one with: {}",
            style("i").blue().bold(),
            style("persona create --name <NAME>").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Empathy").fg(Color::White),
        Cell::new("Rapport").fg(Color::White),
        Cell::new("Exploration").fg(Color::White),
        Cell::new("Speed").fg(Color::White),
        Cell::new("Voice").fg(Color::White),
        Cell::new("Agent").fg(Color::White),
    ]);

    for interviewer in &interviewers {
        let agent_cell = match interviewer.agent_id.as_deref().filter(|a| !a.is_empty()) {
            Some(agent) => Cell::new(agent).fg(Color::Green),
            None => Cell::new("unlinked").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(interviewer.id).fg(Color::DarkGrey),
            Cell::new(&interviewer.name).fg(Color::Cyan),
            Cell::new(format!("{:.1}", to_slider(interviewer.empathy))),
            Cell::new(format!("{:.1}", to_slider(interviewer.rapport))),
            Cell::new(format!("{:.1}", to_slider(interviewer.exploration))),
            Cell::new(format!("{:.1}", to_slider(interviewer.speed))),
            Cell::new(voice_label(interviewer.audio.as_deref())),
            agent_cell,
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

fn print_details(interviewer: &Interviewer) {
    println!();
    println!(
        "  {} {}",
        style(&interviewer.name).cyan().bold(),
        style(format!("#{}", interviewer.id)).dim()
    );
    if let Some(description) = interviewer.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  {}", style(description).italic());
    }
    println!();
    for (dimension, stored) in [
        (Dimension::Empathy, interviewer.empathy),
        (Dimension::Rapport, interviewer.rapport),
        (Dimension::Exploration, interviewer.exploration),
        (Dimension::Speed, interviewer.speed),
    ] {
        println!(
            "  {:<12} {}",
            style(dimension.label()).bold(),
            slider_bar(to_slider(stored))
        );
    }
    println!();
    println!("  {:<12} {}", style("Avatar").bold(), interviewer.image);
    println!(
        "  {:<12} {}",
        style("Voice").bold(),
        voice_label(interviewer.audio.as_deref())
    );
    println!(
        "  {:<12} {}",
        style("Agent").bold(),
        interviewer.agent_id.as_deref().unwrap_or("-")
    );
    println!(
        "  {:<12} {}",
        style("Created").bold(),
        style(interviewer.created_at.format("%Y-%m-%d %H:%M")).dim()
    );
    println!();
}

/// Show the details view of one interviewer.
pub async fn show_interviewer(api: &HttpInterviewerApi, id: InterviewerId, json: bool) -> Result<()> {
    let mut card = InterviewerCard::new(api.get(id).await?, api.clone(), RefreshBus::new(1));
    card.open_details();

    if json {
        println!("{}", serde_json::to_string_pretty(card.interviewer())?);
        return Ok(());
    }

    print_details(card.interviewer());
    card.close_details();
    Ok(())
}

/// Create an interviewer from flags, prompting for the name when missing.
pub async fn create_interviewer(api: &HttpInterviewerApi, args: CreateArgs, json: bool) -> Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => Input::<String>::new()
            .with_prompt("Interviewer name")
            .interact_text()?,
    };

    let image = match args.avatar {
        Some(id) => avatar_by_id(id)
            .ok_or_else(|| anyhow!("unknown avatar id {id}; see `persona avatars`"))?
            .img
            .to_string(),
        None => String::new(),
    };

    let new = NewInterviewer {
        name,
        empathy: from_slider(args.empathy),
        rapport: from_slider(args.rapport),
        exploration: from_slider(args.exploration),
        speed: from_slider(args.speed),
        image,
        description: args.description,
        audio: args.audio,
        agent_id: args.agent_id,
    };

    let spinner = spinner(format!("Creating {}...", new.name), "cyan")?;
    let created = api.create(&new).await;
    spinner.finish_and_clear();
    let created = created?;

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
        return Ok(());
    }

    println!();
    println!("  {} Interviewer created!", style("✓").green().bold());
    print_details(&created);
    Ok(())
}

/// Prompt for every editable field, pre-filled from the draft.
fn prompt_draft<A: InterviewerApi>(card: &mut InterviewerCard<A>) -> Result<()> {
    let name = Input::<String>::new()
        .with_prompt("Name")
        .default(card.draft().name.clone())
        .interact_text()?;
    card.set_name(name);

    let description = Input::<String>::new()
        .with_prompt("Description")
        .default(card.draft().description.clone())
        .allow_empty(true)
        .interact_text()?;
    card.set_description(description);

    for dimension in Dimension::ALL {
        let value = Input::<f64>::new()
            .with_prompt(format!("{} (0.0-1.0)", dimension.label()))
            .default(card.draft().dimension(dimension))
            .validate_with(|v: &f64| {
                if (0.0..=1.0).contains(v) {
                    Ok(())
                } else {
                    Err("must be between 0.0 and 1.0")
                }
            })
            .interact_text()?;
        card.set_dimension(dimension, value);
    }

    card.open_gallery();
    let mut avatar_items: Vec<String> = vec![format!("Keep current ({})", card.draft().image)];
    avatar_items.extend(AVATAR_OPTIONS.iter().map(|a| format!("{}  {}", a.id, a.img)));
    let choice = Select::new()
        .with_prompt("Avatar")
        .items(&avatar_items)
        .default(0)
        .interact()?;
    match choice {
        0 => card.close_gallery(),
        n => card.select_avatar(AVATAR_OPTIONS[n - 1].img),
    }

    let voice = Select::new()
        .with_prompt("Voice")
        .items(&voice_items(&card.draft().audio))
        .default(0)
        .interact()?;
    if let Some(audio) = picked_voice(voice) {
        card.select_audio(audio);
    }

    Ok(())
}

/// Voice picker entries. The first one keeps the current voice.
fn voice_items(current: &str) -> Vec<String> {
    let mut items = vec![format!("Keep current ({})", voice_label(Some(current)))];
    items.extend(AUDIO_OPTIONS.iter().map(|o| o.label.to_string()));
    items
}

/// Catalog voice behind a picker index from [`voice_items`].
fn picked_voice(index: usize) -> Option<&'static str> {
    index
        .checked_sub(1)
        .and_then(|i| AUDIO_OPTIONS.get(i))
        .map(|o| o.value)
}

/// Ask for one of the card's action buttons; `true` when the first is picked.
fn choose_action(prompt: String, action: &str) -> Result<bool> {
    let choice = Select::new()
        .with_prompt(prompt)
        .items(&[action, "Cancel"])
        .default(1)
        .interact()?;
    Ok(choice == 0)
}

fn apply_flags<A: InterviewerApi>(card: &mut InterviewerCard<A>, args: &EditArgs) -> Result<()> {
    if let Some(name) = &args.name {
        card.set_name(name.clone());
    }
    if let Some(description) = &args.description {
        card.set_description(description.clone());
    }
    for (dimension, value) in [
        (Dimension::Empathy, args.empathy),
        (Dimension::Rapport, args.rapport),
        (Dimension::Exploration, args.exploration),
        (Dimension::Speed, args.speed),
    ] {
        if let Some(value) = value {
            card.set_dimension(dimension, value);
        }
    }
    if let Some(id) = args.avatar {
        let avatar =
            avatar_by_id(id).ok_or_else(|| anyhow!("unknown avatar id {id}; see `persona avatars`"))?;
        card.open_gallery();
        card.select_avatar(avatar.img);
    }
    if let Some(audio) = &args.audio {
        card.select_audio(audio.clone());
    }
    Ok(())
}

async fn play_preview<A, P>(card: &mut InterviewerCard<A>, player: Arc<P>) -> Result<()>
where
    A: InterviewerApi,
    P: AudioPlayer + 'static,
{
    match card.preview_audio(player) {
        Some(handle) => {
            println!(
                "  {} Previewing {}",
                style("♪").magenta(),
                voice_label(card.audio_preview())
            );
            handle.await?;
        }
        None => println!("  {} No voice selected to preview.", style("i").blue()),
    }
    Ok(())
}

/// Edit an interviewer through the card's edit form.
pub async fn edit_interviewer(
    api: &HttpInterviewerApi,
    dashboard: &DashboardConfig,
    args: EditArgs,
    json: bool,
) -> Result<()> {
    let id = InterviewerId(args.id);
    let refresh = RefreshBus::new(8);
    let mut refreshes = refresh.subscribe();

    let mut card = InterviewerCard::new(api.get(id).await?, api.clone(), refresh);
    card.open_edit();

    if args.has_changes() {
        apply_flags(&mut card, &args)?;
    } else if json {
        bail!("--json requires at least one field flag");
    } else {
        prompt_draft(&mut card)?;
    }

    if args.preview {
        let player = Arc::new(SystemAudioPlayer::from_config(dashboard)?);
        play_preview(&mut card, player).await?;
    }

    if !args.has_changes() && !choose_action(format!("Update {}?", card.draft().name), card.save_label())? {
        card.close_edit();
        println!("  Cancelled.");
        return Ok(());
    }

    let spinner = spinner(format!("Saving {}...", card.draft().name), "cyan")?;
    let saved = card.save().await;
    spinner.finish_and_clear();

    if !saved {
        bail!("{}", card.error().unwrap_or("Failed to update interviewer"));
    }

    // The list owner reacts to the refresh event by refetching.
    if let Ok(RefreshEvent::Updated(updated_id)) = refreshes.try_recv() {
        card.replace_interviewer(api.get(updated_id).await?);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(card.interviewer())?);
        return Ok(());
    }

    println!();
    println!("  {} Interviewer updated.", style("✓").green().bold());
    print_details(card.interviewer());
    Ok(())
}

/// Delete an interviewer through the card's confirmation flow.
pub async fn delete_interviewer(
    api: &HttpInterviewerApi,
    id: InterviewerId,
    force: bool,
    json: bool,
) -> Result<()> {
    let mut card = InterviewerCard::new(api.get(id).await?, api.clone(), RefreshBus::new(1));
    card.request_delete();

    if !force && !json {
        let confirmed = choose_action(
            format!(
                "Delete interviewer '{}' and its voice agent?",
                style(&card.interviewer().name).red().bold()
            ),
            card.delete_label(),
        )?;

        if !confirmed {
            card.cancel_delete();
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let spinner = spinner(format!("Deleting {}...", card.interviewer().name), "red")?;
    let deleted = card.confirm_delete().await;
    spinner.finish_and_clear();

    if !deleted {
        bail!("{}", card.error().unwrap_or("Failed to delete interviewer"));
    }

    if json {
        println!("{}", serde_json::json!({"deleted": true, "id": card.id()}));
    } else {
        println!(
            "  {} Interviewer '{}' deleted.",
            style("✓").red().bold(),
            card.interviewer().name
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_bar() {
        assert_eq!(slider_bar(0.7), "███████░░░ 0.7");
        assert_eq!(slider_bar(0.0), "░░░░░░░░░░ 0.0");
    }

    #[test]
    fn test_voice_picker_keeps_current_by_default() {
        let items = voice_items("");
        assert_eq!(items[0], "Keep current (-)");
        assert_eq!(items.len(), AUDIO_OPTIONS.len() + 1);
        assert_eq!(voice_items("/audio/Bob.wav")[0], "Keep current (Bob (Male))");

        assert_eq!(picked_voice(0), None);
        assert_eq!(picked_voice(1), Some("/audio/Lisa.wav"));
        assert_eq!(picked_voice(2), Some("/audio/Bob.wav"));
        assert_eq!(picked_voice(AUDIO_OPTIONS.len() + 1), None);
    }

    #[test]
    fn test_voice_label() {
        assert_eq!(voice_label(Some("/audio/Lisa.wav")), "Lisa (Female)");
        assert_eq!(voice_label(Some("/custom.wav")), "/custom.wav");
        assert_eq!(voice_label(Some("")), "-");
        assert_eq!(voice_label(None), "-");
    }
}
