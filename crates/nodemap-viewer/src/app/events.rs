use bevy::prelude::Event;

/// Left click on the map: a marker index, or `None` for empty map.
#[derive(Event, Debug, Clone, Copy)]
pub struct Picked(pub Option<usize>);
