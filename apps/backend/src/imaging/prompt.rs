//! Text-to-image prompt describing the city in visual terms.

use crate::domain::{CityState, Dimension, MasterPolicy};

const BASE_STYLE: &str = "Photorealistic aerial view of a modern city, professional photography, \
golden hour lighting, ultra detailed";

fn describe(dim: Dimension, value: i32) -> &'static str {
    // [>=80, >=60, >=40, >=20, below]
    let tiers: [&str; 5] = match dim {
        Dimension::Economy => [
            "towering glass skyscrapers, luxury shopping districts, construction cranes everywhere",
            "modern office buildings, busy commercial areas, thriving downtown",
            "mixed urban landscape, moderate commercial activity",
            "older buildings in disrepair, vacant storefronts",
            "abandoned factories, boarded-up shops, crumbling infrastructure",
        ],
        Dimension::Welfare => [
            "modern hospitals, community centers, clean accessible public spaces",
            "adequate public facilities, organized public areas",
            "basic public services visible",
            "overcrowded public facilities, visible poverty",
            "homeless encampments, dilapidated public buildings, stark inequality",
        ],
        Dimension::Education => [
            "prestigious university campuses, libraries, research facilities",
            "well-maintained schools and educational institutions",
            "standard school buildings",
            "older school buildings, limited educational infrastructure",
            "neglected schools, closed libraries",
        ],
        Dimension::Environment => [
            "lush parks everywhere, rooftop gardens, solar panels, clean rivers, clear blue sky",
            "well-kept parks, relatively clean air",
            "limited green spaces, average air quality",
            "few parks, smoggy atmosphere, brown haze in the sky",
            "heavy smog, polluted waterways, dead trees, smokestacks belching smoke",
        ],
        Dimension::Security => [
            "clean well-lit streets, orderly traffic, peaceful neighborhoods",
            "generally safe streets, visible security presence",
            "normal urban environment",
            "graffiti on walls, neglected areas, security barriers",
            "barred windows, checkpoints, damaged buildings, tense atmosphere",
        ],
        Dimension::HumanRights => [
            "diverse crowds, street art, open public gatherings, vibrant street life",
            "mixed population, cultural venues",
            "typical urban population",
            "uniform appearance, surveillance cameras, controlled public spaces",
            "heavy surveillance infrastructure, restricted areas, oppressive feeling",
        ],
    };
    let idx = match value {
        80.. => 0,
        60..=79 => 1,
        40..=59 => 2,
        20..=39 => 3,
        _ => 4,
    };
    tiers[idx]
}

fn atmosphere(city: &CityState) -> &'static str {
    let avg = city.iter().map(|(_, v)| v).sum::<i32>() / Dimension::ALL.len() as i32;
    match avg {
        70.. => "utopian prosperous city, hopeful atmosphere",
        55..=69 => "thriving modern city, optimistic atmosphere",
        45..=54 => "typical modern city, neutral atmosphere",
        30..=44 => "struggling city, somewhat gloomy atmosphere",
        _ => "dystopian cityscape, dark oppressive atmosphere",
    }
}

pub fn city_prompt(city: &CityState, passed: &[MasterPolicy]) -> String {
    let mut parts = vec![BASE_STYLE.to_string()];
    parts.extend(city.iter().map(|(dim, value)| describe(dim, value).to_string()));
    if let Some(latest) = passed.last() {
        parts.push(format!("a city that has just enacted \"{}\"", latest.title));
    }
    parts.push(atmosphere(city).to_string());
    parts.join(", ")
}
