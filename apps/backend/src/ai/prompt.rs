//! Reviewer prompt construction.

use std::fmt::Write as _;

use crate::ai::trait_def::PetitionContext;
use crate::domain::{CityState, Dimension, MasterPolicy};

/// Effects the reviewer may propose, per dimension.
pub const EFFECT_MIN: i32 = -20;
pub const EFFECT_MAX: i32 = 20;

/// Qualitative label for a dimension value.
pub fn dimension_label(value: i32) -> &'static str {
    match value {
        i32::MIN..=20 => "critical",
        21..=35 => "low",
        36..=45 => "somewhat low",
        46..=55 => "standard",
        56..=65 => "somewhat high",
        66..=80 => "strong",
        _ => "overheated",
    }
}

fn dimension_gloss(dim: Dimension) -> &'static str {
    match dim {
        Dimension::Economy => "industry, jobs, public finances",
        Dimension::Welfare => "social security, healthcare, pensions",
        Dimension::Education => "schools, research, skills",
        Dimension::Environment => "nature, energy, sustainability",
        Dimension::Security => "policing, crime prevention, public safety",
        Dimension::HumanRights => "freedom, equality, privacy",
    }
}

/// Current city, grouped into what the city values, what it struggles
/// with, and the rest.
pub fn city_status(city: &CityState) -> String {
    let mut high = Vec::new();
    let mut low = Vec::new();
    let mut normal = Vec::new();
    for (dim, value) in city.iter() {
        let line = format!("{}: {value} ({})", dim.as_str(), dimension_label(value));
        if value >= 60 {
            high.push(line);
        } else if value <= 40 {
            low.push(line);
        } else {
            normal.push(line);
        }
    }

    let mut out = String::from("Current state of the country (50 is the starting value, 0 or below means collapse):\n");
    for (heading, lines) in [
        ("Values this country prioritises", high),
        ("Problems this country faces", low),
        ("Everything else", normal),
    ] {
        if lines.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{heading}:");
        for line in lines {
            let _ = writeln!(out, "  - {line}");
        }
    }
    out
}

/// Numbered history of passed policies with their effects.
pub fn policy_history(passed: &[MasterPolicy]) -> String {
    if passed.is_empty() {
        return "Policies adopted so far:\n(none yet)\n".to_string();
    }

    let mut out = String::from("Policies adopted so far, by referendum:\n");
    for (i, policy) in passed.iter().enumerate() {
        let effects = Dimension::ALL
            .iter()
            .map(|dim| format!("{}:{:+}", dim.as_str(), policy.effects.get(*dim)))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "{}. {}", i + 1, policy.title);
        let _ = writeln!(out, "   description: {}", policy.description);
        let _ = writeln!(out, "   impact: {effects}");
    }
    out
}

/// Full system prompt for one petition.
pub fn build_prompt(ctx: &PetitionContext) -> String {
    let mut out = String::new();
    out.push_str(
        "You are the policy review officer of a fictional country. \
         Citizens submit petitions proposing new policies; decide whether to approve or reject each one.\n\n",
    );

    out.push_str("The country is described by six parameters:\n");
    for dim in Dimension::ALL {
        let _ = writeln!(out, "- {}: {}", dim.as_str(), dimension_gloss(dim));
    }
    out.push('\n');

    out.push_str(&city_status(&ctx.city));
    out.push('\n');
    out.push_str(&policy_history(&ctx.passed));
    out.push('\n');

    for (key, value) in &ctx.extras {
        let _ = writeln!(out, "{key}: {value}");
    }
    if !ctx.extras.is_empty() {
        out.push('\n');
    }

    let _ = writeln!(out, "Citizen petition:\n{}\n", ctx.text);

    let _ = write!(
        out,
        "First infer what kind of country this is from the information above. \
         Then judge whether its citizens would support the petition and whether it fits the direction of past policy.\n\n\
         If approved, each effect must be between {EFFECT_MIN} and {EFFECT_MAX}; \
         the main effect around 15 to 20 in magnitude, side effects around 5 to 10, with realistic trade-offs.\n\n\
         Reply with JSON only.\n\
         Approval: {{\"approved\": true, \"title\": \"...\", \"description\": \"what the policy does, without its effects\", \
         \"newsFlash\": \"one-line breaking news when it passes\", \
         \"effects\": {{\"economy\": 0, \"welfare\": 0, \"education\": 0, \"environment\": 0, \"security\": 0, \"humanRights\": 0}}}}\n\
         Rejection: {{\"approved\": false, \"reason\": \"reason in the voice of a real official\"}}\n\
         Stay in character and never mention games, parameters or balance.\n"
    );
    out
}
