//! Avatar gallery and voice listings.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};

use persona_types::catalog::{AUDIO_OPTIONS, AVATAR_OPTIONS};

pub fn list_avatars(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(AVATAR_OPTIONS)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Image").fg(Color::White),
    ]);
    for avatar in AVATAR_OPTIONS {
        table.add_row(vec![
            Cell::new(avatar.id).fg(Color::Cyan),
            Cell::new(avatar.img),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

pub fn list_voices(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(AUDIO_OPTIONS)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Voice").fg(Color::White),
        Cell::new("Reference").fg(Color::White),
    ]);
    for voice in AUDIO_OPTIONS {
        table.add_row(vec![
            Cell::new(voice.label).fg(Color::Cyan),
            Cell::new(voice.value),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}
