use crate::domain::room::RoomStatus;
use crate::domain::test_room_helpers::{catalog, lobby_with, voting_with};
use crate::domain::view::room_view;

#[test]
fn options_never_expose_effects() {
    let catalog = catalog();
    let agg = voting_with(2);
    let view = room_view(&agg, &catalog, Some("u1")).unwrap();
    assert_eq!(view.current_options.len(), 3);
    let json = serde_json::to_value(&view).unwrap();
    for opt in json["currentOptions"].as_array().unwrap() {
        assert!(opt.get("effects").is_none());
    }
}

#[test]
fn caller_sees_only_own_ideology_while_playing() {
    let catalog = catalog();
    let agg = voting_with(3);
    let view = room_view(&agg, &catalog, Some("u2")).unwrap();
    let me = view.me.unwrap();
    assert_eq!(me.user_id, "u2");
    assert_eq!(
        me.ideology.map(|i| i.id),
        agg.player("u2").unwrap().ideology_id.clone()
    );
    assert!(view.players.iter().all(|p| p.ideology.is_none()));
}

#[test]
fn outsiders_get_no_self_section() {
    let catalog = catalog();
    let agg = lobby_with(2);
    let view = room_view(&agg, &catalog, Some("stranger")).unwrap();
    assert!(view.me.is_none());
    let json = serde_json::to_value(&view).unwrap();
    assert!(json.get("self").is_none());
}

#[test]
fn finished_room_reveals_every_ideology() {
    let catalog = catalog();
    let mut agg = voting_with(2);
    agg.room.status = RoomStatus::Finished;
    let view = room_view(&agg, &catalog, None).unwrap();
    assert!(view.players.iter().all(|p| p.ideology.is_some()));
}

#[test]
fn has_voted_tracks_ballots_not_choices() {
    let catalog = catalog();
    let mut agg = voting_with(2);
    let option = agg.room.current_policy_ids[0].clone();
    crate::domain::lifecycle::vote(&mut agg, "u1", &option).unwrap();
    let view = room_view(&agg, &catalog, Some("u2")).unwrap();
    let voted: Vec<_> = view.players.iter().map(|p| p.has_voted).collect();
    assert_eq!(voted, vec![true, false]);
    assert_eq!(view.me.unwrap().current_vote, None);
}
