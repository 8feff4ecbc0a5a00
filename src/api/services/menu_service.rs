use crate::api::types::{Button, CallbackAction, OutboundMessage};
use crate::modules::persona::{Persona, PersonaMap, TRAIT_MAX};
use crate::modules::session::{CharacterMetrics, MoodBand};

pub const NO_SELECTION_MESSAGE: &str =
    "You haven't selected a character yet! Use /characters to choose one, or tap the button below:";
pub const NO_SELECTION_SHORT_MESSAGE: &str =
    "You haven't selected a character yet! Use /characters to choose one.";
pub const UNKNOWN_PERSONA_MESSAGE: &str =
    "The selected character no longer exists. Please choose another one with /characters.";
pub const UNKNOWN_COMMAND_MESSAGE: &str =
    "Sorry, I don't know that command. Use /help to see what I can do.";

const HELP_TEXT: &str = "🤖 Character Chat Bot Help 🤖\n\n\
Available Commands:\n\
/characters - List all available characters\n\
/character - Show your current character\n\
/create - Create a custom character\n\
/delete - Delete a custom character\n\
/cancel - Stop creating a character\n\
/reset - Reset conversation with current character\n\
/stats - Show character's mood and personality stats\n\
/nsfw - Show or hide mature characters\n\
/help - Show this help message\n\n\
How to use:\n\
1. Select a character using /characters\n\
2. Start chatting with them!\n\
3. The character will respond based on their personality.\n\
4. Their mood might change based on your conversation.\n\n\
Custom Characters:\n\
Create your own characters with /create\n\
You can set their name, background, and personality traits.";

pub fn stat_bar(value: u8) -> String {
    let filled = value.min(TRAIT_MAX) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(TRAIT_MAX as usize - filled))
}

pub fn mood_description(band: MoodBand) -> String {
    format!("{} {}", band.label(), band.emoji())
}

fn choose_button() -> Button {
    Button::new("Choose a Character", &CallbackAction::ShowCharacters)
}

fn create_button(label: &str) -> Button {
    Button::new(label, &CallbackAction::CreateCharacter)
}

pub fn start_message() -> OutboundMessage {
    OutboundMessage::plain(
        "Hello! I'm a character-based chat bot powered by Mistral AI.\n\n\
         I can take on the personality of various fictional characters and chat with you as them!\n\n\
         Use /help to see all available commands, or tap a button below to get started:",
    )
    .with_button(choose_button())
    .with_button(create_button("Create Custom Character"))
    .with_button(Button::new("Help", &CallbackAction::Help))
}

pub fn help_message() -> OutboundMessage {
    OutboundMessage::plain(HELP_TEXT)
        .with_button(choose_button())
        .with_button(create_button("Create Custom Character"))
}

pub fn no_selection_message() -> OutboundMessage {
    OutboundMessage::plain(NO_SELECTION_MESSAGE).with_button(choose_button())
}

/// Presets first, then the user's own personas. Mature personas only show
/// up when the user has opted in.
pub fn character_list(all: &PersonaMap, owned: &[String], allow_mature: bool) -> OutboundMessage {
    let visible = |persona: &&Persona| allow_mature || !persona.is_mature;
    let select = |persona: &Persona| {
        Button::new(
            persona.name.clone(),
            &CallbackAction::SelectCharacter(persona.id.clone()),
        )
    };

    let mut message = OutboundMessage::plain("Choose a character to chat with:").with_button(Button::new(
        "--- Preset Characters ---",
        &CallbackAction::PresetHeader,
    ));

    for persona in all.values().filter(|p| !p.is_custom()).filter(visible) {
        message = message.with_button(select(persona));
    }

    let customs: Vec<&Persona> = owned
        .iter()
        .filter_map(|id| all.get(id))
        .filter(visible)
        .collect();
    if !customs.is_empty() {
        message = message.with_button(Button::new(
            "--- Your Custom Characters ---",
            &CallbackAction::CustomHeader,
        ));
        for persona in customs {
            message = message.with_button(select(persona));
        }
    }

    message.with_button(create_button("Create New Character"))
}

pub fn selected_message(persona: &Persona) -> OutboundMessage {
    OutboundMessage::plain(format!(
        "You are now chatting with {}!\n\n{}\n\nStart chatting now! You can reset the conversation anytime with /reset",
        persona.name, persona.description
    ))
}

pub fn current_character(persona: &Persona, metrics: Option<&CharacterMetrics>) -> OutboundMessage {
    let mut text = format!(
        "You are currently chatting with {}\n\n{}\n\n",
        persona.name, persona.description
    );
    if let Some(metrics) = metrics {
        text.push_str(&format!(
            "Current mood: {}\nConversations: {}\n\n",
            mood_description(metrics.mood_band()),
            metrics.conversation_count
        ));
    }
    text.push_str("Use /stats to see more detailed personality stats.");

    OutboundMessage::plain(text)
        .with_button(Button::new(
            "Reset Conversation",
            &CallbackAction::Reset(persona.id.clone()),
        ))
        .with_button(Button::new(
            "Choose Different Character",
            &CallbackAction::ShowCharacters,
        ))
}

pub fn stats_message(persona: &Persona, metrics: &CharacterMetrics) -> OutboundMessage {
    let mood_level = metrics.mood.round() as u8;
    let mut text = format!(
        "📊 {} Stats 📊\n\nCurrent Mood: {}\n{}\n\nConversations: {}\n\nPersonality Traits:\n",
        persona.name,
        mood_description(metrics.mood_band()),
        stat_bar(mood_level),
        metrics.conversation_count
    );

    let traits = persona.traits.as_ref().unwrap_or(&metrics.personality_stats);
    for (name, value) in traits.iter() {
        text.push_str(&format!("{}: {} ({}/10)\n", name.label(), stat_bar(value), value));
    }

    OutboundMessage::plain(text)
}

pub fn delete_menu(owned: &[Persona]) -> OutboundMessage {
    if owned.is_empty() {
        return OutboundMessage::plain(
            "You don't have any custom characters to delete. Use /create to make one!",
        );
    }

    let mut message = OutboundMessage::plain("Select a custom character to delete:");
    for persona in owned {
        message = message.with_button(Button::new(
            persona.name.clone(),
            &CallbackAction::DeleteCharacter(persona.id.clone()),
        ));
    }
    message.with_button(Button::new("Cancel", &CallbackAction::CancelDelete))
}
