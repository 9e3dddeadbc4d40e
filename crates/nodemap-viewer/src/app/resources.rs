use bevy::prelude::Resource;
use crossbeam_channel::Receiver;

use crate::source::Incoming;
use crate::util::config::ViewerConfig;

#[derive(Resource)]
pub struct SourceRx(pub Receiver<Incoming>);

/// Config as loaded at startup; settings saves start from it.
#[derive(Resource, Clone)]
pub struct LoadedConfig(pub ViewerConfig);
