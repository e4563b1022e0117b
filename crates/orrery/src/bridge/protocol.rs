/// Frame buffer layout shared with the JavaScript renderer.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 6 floats]
/// [Nodes: max_nodes × 12 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header on every frame.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::config::SimConfig;
use crate::api::orrery::Orrery;
use crate::api::types::SimEvent;
use crate::core::scene::{NodeState, SceneBuffer};
use crate::renderer::camera::CameraFrame;
use crate::renderer::traits::NodeId;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_NODES: usize = 2;
pub const HEADER_NODE_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
/// Active eclipse tour phase, -1 when no tour runs.
pub const HEADER_TOUR_PHASE: usize = 6;
pub const HEADER_BLOOM_STRENGTH: usize = 7;
pub const HEADER_BLOOM_RADIUS: usize = 8;
pub const HEADER_AMBIENT: usize = 9;
/// 0 when there is no corona.
pub const HEADER_CORONA_OPACITY: usize = 10;
pub const HEADER_STARFIELD_OPACITY: usize = 11;
/// `LayerVisibility::bits`.
pub const HEADER_LAYER_BITS: usize = 12;
pub const HEADER_SPEED: usize = 13;
pub const HEADER_PAUSED: usize = 14;
/// 1 while the tour hides the regular UI.
pub const HEADER_UI_HIDDEN: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats for the camera: eye x, y, z, target x, y, z.
pub const CAMERA_FLOATS: usize = CameraFrame::FLOATS;

/// Floats per node: tag, index, sub, x, y, z, rot x, rot y, rot z, visible,
/// emissive, opacity.
pub const NODE_FLOATS: usize = 12;

/// Floats per event: kind, a, b, c.
pub const EVENT_FLOATS: usize = SimEvent::FLOATS;

/// Node tags (first float of a node record).
pub const TAG_SUN: f32 = 0.0;
pub const TAG_BODY: f32 = 1.0;
pub const TAG_MOON: f32 = 2.0;
pub const TAG_ORBIT_RING: f32 = 3.0;
pub const TAG_BELT_ENTRY: f32 = 4.0;
pub const TAG_FETCHED: f32 = 5.0;
pub const TAG_CORONA: f32 = 6.0;
pub const TAG_STARFIELD: f32 = 7.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub max_nodes: usize,
    pub max_events: usize,

    pub camera_offset: usize,
    pub node_data_offset: usize,
    pub event_data_offset: usize,

    pub node_data_floats: usize,
    pub event_data_floats: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl FrameLayout {
    pub fn new(max_nodes: usize, max_events: usize) -> Self {
        let node_data_floats = max_nodes * NODE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let camera_offset = HEADER_FLOATS;
        let node_data_offset = camera_offset + CAMERA_FLOATS;
        let event_data_offset = node_data_offset + node_data_floats;
        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_nodes,
            max_events,
            camera_offset,
            node_data_offset,
            event_data_offset,
            node_data_floats,
            event_data_floats,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.max_nodes, config.max_events)
    }
}

/// Tag, index and sub-index identifying a node on the wire.
pub fn encode_node(node: NodeId) -> [f32; 3] {
    match node {
        NodeId::Sun => [TAG_SUN, 0.0, 0.0],
        NodeId::Body(id) => [TAG_BODY, id.0 as f32, 0.0],
        NodeId::Moon(id) => [TAG_MOON, id.body.0 as f32, id.moon as f32],
        NodeId::OrbitRing(id) => [TAG_ORBIT_RING, id.0 as f32, 0.0],
        NodeId::BeltEntry { belt, index } => [TAG_BELT_ENTRY, belt.index() as f32, index as f32],
        NodeId::Fetched { kind, index } => [TAG_FETCHED, kind.code() as f32, index as f32],
        NodeId::Corona => [TAG_CORONA, 0.0, 0.0],
        NodeId::Starfield => [TAG_STARFIELD, 0.0, 0.0],
    }
}

fn encode_state(node: NodeId, state: &NodeState) -> [f32; NODE_FLOATS] {
    let [tag, index, sub] = encode_node(node);
    [
        tag,
        index,
        sub,
        state.position.x,
        state.position.y,
        state.position.z,
        state.rotation.x,
        state.rotation.y,
        state.rotation.z,
        if state.visible { 1.0 } else { 0.0 },
        state.emissive,
        state.opacity,
    ]
}

/// Counts written by [`write_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCounts {
    pub nodes: usize,
    pub events: usize,
}

/// Serialize one frame. Nodes and events beyond the layout's capacity are
/// dropped. A buffer shorter than the layout is left untouched.
pub fn write_frame(buffer: &mut [f32], layout: &FrameLayout, orrery: &Orrery, scene: &SceneBuffer) -> FrameCounts {
    if buffer.len() < layout.buffer_total_floats {
        log::warn!(
            "frame buffer holds {} floats, layout needs {}",
            buffer.len(),
            layout.buffer_total_floats
        );
        return FrameCounts { nodes: 0, events: 0 };
    }

    let mut nodes = 0;
    for (i, (node, state)) in scene.iter().take(layout.max_nodes).enumerate() {
        let start = layout.node_data_offset + i * NODE_FLOATS;
        buffer[start..start + NODE_FLOATS].copy_from_slice(&encode_state(*node, state));
        nodes += 1;
    }

    let events = &orrery.events()[..orrery.events().len().min(layout.max_events)];
    let event_floats: &[f32] = bytemuck::cast_slice(events);
    buffer[layout.event_data_offset..layout.event_data_offset + event_floats.len()].copy_from_slice(event_floats);

    let camera = orrery.camera().frame();
    let camera_floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&camera));
    buffer[layout.camera_offset..layout.camera_offset + CAMERA_FLOATS].copy_from_slice(camera_floats);

    let bloom = orrery.bloom().params();
    let lighting = orrery.lighting();
    let header = &mut buffer[..HEADER_FLOATS];
    header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    header[HEADER_FRAME_COUNTER] = orrery.frame() as f32;
    header[HEADER_MAX_NODES] = layout.max_nodes as f32;
    header[HEADER_NODE_COUNT] = nodes as f32;
    header[HEADER_MAX_EVENTS] = layout.max_events as f32;
    header[HEADER_EVENT_COUNT] = events.len() as f32;
    header[HEADER_TOUR_PHASE] = orrery.tour().phase().map_or(-1.0, |p| p as f32);
    header[HEADER_BLOOM_STRENGTH] = bloom.strength;
    header[HEADER_BLOOM_RADIUS] = bloom.radius;
    header[HEADER_AMBIENT] = lighting.ambient();
    header[HEADER_CORONA_OPACITY] = lighting.corona().map_or(0.0, |c| c.opacity);
    header[HEADER_STARFIELD_OPACITY] = lighting.starfield_opacity();
    header[HEADER_LAYER_BITS] = orrery.layers().bits() as f32;
    header[HEADER_SPEED] = orrery.clock().speed() as f32;
    header[HEADER_PAUSED] = if orrery.clock().is_paused() { 1.0 } else { 0.0 };
    header[HEADER_UI_HIDDEN] = if lighting.ui_hidden { 1.0 } else { 0.0 };

    FrameCounts { nodes, events: events.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{BodyId, EclipseKind, FetchedKind, MoonId};
    use crate::catalog::belts::BeltKind;
    use crate::core::clock::FixedWallClock;
    use crate::input::queue::Intent;

    const NOW: FixedWallClock = FixedWallClock(1_700_000_000_000.0);

    fn orrery() -> Orrery {
        let config = SimConfig {
            start_days_from_j2000: Some(100.0),
            ..SimConfig::default()
        };
        Orrery::new(config, &NOW)
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = FrameLayout::new(100, 20);
        assert_eq!(layout.camera_offset, HEADER_FLOATS);
        assert_eq!(layout.node_data_offset, HEADER_FLOATS + 6);
        assert_eq!(layout.event_data_offset, layout.node_data_offset + 100 * NODE_FLOATS);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 20 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn default_config_fits_the_catalog_scene() {
        let o = orrery();
        let layout = FrameLayout::from_config(o.config());
        let mut scene = SceneBuffer::new();
        o.sync(&mut scene);
        assert!(scene.len() <= layout.max_nodes, "{} nodes", scene.len());
        assert_eq!(layout.max_events, 64);
    }

    #[test]
    fn node_tags() {
        assert_eq!(encode_node(NodeId::Moon(MoonId::new(BodyId(2), 0))), [TAG_MOON, 2.0, 0.0]);
        assert_eq!(
            encode_node(NodeId::BeltEntry { belt: BeltKind::ALL[3], index: 7 }),
            [TAG_BELT_ENTRY, 3.0, 7.0]
        );
        assert_eq!(
            encode_node(NodeId::Fetched { kind: FetchedKind::Comet, index: 1 }),
            [TAG_FETCHED, FetchedKind::Comet.code() as f32, 1.0]
        );
    }

    #[test]
    fn writes_header_camera_nodes_and_events() {
        let mut o = orrery();
        o.push_intent(Intent::StartEclipseTour(EclipseKind::Solar));
        o.tick(16.0, &NOW);
        let mut scene = SceneBuffer::new();
        o.present(&mut scene);

        let layout = FrameLayout::from_config(o.config());
        let mut buffer = vec![0.0; layout.buffer_total_floats];
        let counts = write_frame(&mut buffer, &layout, &o, &scene);

        assert_eq!(counts.nodes, scene.len());
        assert_eq!(counts.events, o.events().len());
        assert_eq!(buffer[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(buffer[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(buffer[HEADER_TOUR_PHASE], 0.0);
        assert_eq!(buffer[HEADER_UI_HIDDEN], 1.0);
        assert_eq!(buffer[HEADER_STARFIELD_OPACITY], 0.65);

        let cam = o.camera();
        assert_eq!(buffer[layout.camera_offset], cam.position.x);
        assert_eq!(buffer[layout.camera_offset + 5], cam.target.z);

        // First node record matches the first scene node
        let (node, state) = scene.iter().next().unwrap();
        let first = &buffer[layout.node_data_offset..layout.node_data_offset + NODE_FLOATS];
        assert_eq!(&first[..3], &encode_node(*node));
        assert_eq!(first[3], state.position.x);

        let e = layout.event_data_offset;
        let kinds: Vec<f32> = (0..counts.events).map(|i| buffer[e + i * EVENT_FLOATS]).collect();
        assert!(kinds.contains(&SimEvent::TOUR_PHASE));
        assert!(kinds.contains(&SimEvent::DATE));
    }

    #[test]
    fn belt_tumble_survives_serialization() {
        let mut o = orrery();
        o.tick(16.0, &NOW);
        let mut scene = SceneBuffer::new();
        o.sync(&mut scene);

        let layout = FrameLayout::from_config(o.config());
        let mut buffer = vec![0.0; layout.buffer_total_floats];
        write_frame(&mut buffer, &layout, &o, &scene);

        let target = NodeId::BeltEntry { belt: BeltKind::Kuiper, index: 3 };
        let slot = scene.iter().position(|(node, _)| *node == target).unwrap();
        let entry = &o.animator().belts()[BeltKind::Kuiper.index()].entries[3];
        let start = layout.node_data_offset + slot * NODE_FLOATS;
        let record = &buffer[start..start + NODE_FLOATS];
        assert_eq!(&record[..3], &encode_node(target));
        assert_eq!(&record[6..9], &entry.rotation.to_array());
        assert_ne!(record[6], 0.0);
    }

    #[test]
    fn idle_tour_phase_is_negative() {
        let mut o = orrery();
        o.tick(16.0, &NOW);
        let scene = SceneBuffer::new();
        let layout = FrameLayout::new(8, 8);
        let mut buffer = vec![0.0; layout.buffer_total_floats];
        write_frame(&mut buffer, &layout, &o, &scene);
        assert_eq!(buffer[HEADER_TOUR_PHASE], -1.0);
        assert_eq!(buffer[HEADER_CORONA_OPACITY], 0.0);
        assert_eq!(buffer[HEADER_AMBIENT], 0.5);
    }

    #[test]
    fn capacity_truncates_nodes() {
        let o = orrery();
        let mut scene = SceneBuffer::new();
        o.sync(&mut scene);
        let layout = FrameLayout::new(4, 2);
        let mut buffer = vec![0.0; layout.buffer_total_floats];
        let counts = write_frame(&mut buffer, &layout, &o, &scene);
        assert_eq!(counts.nodes, 4);
        assert_eq!(buffer[HEADER_NODE_COUNT], 4.0);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let o = orrery();
        let layout = FrameLayout::new(4, 2);
        let mut buffer = vec![0.0; 10];
        let counts = write_frame(&mut buffer, &layout, &o, &SceneBuffer::new());
        assert_eq!(counts, FrameCounts { nodes: 0, events: 0 });
        assert!(buffer.iter().all(|v| *v == 0.0));
    }
}
