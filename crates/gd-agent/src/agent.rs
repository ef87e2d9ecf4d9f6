//! The agent record.

use gd_core::{AgentId, DepartureTime, LineString, NodeId, TravelMode, ZoneId};

/// One synthesized trip.  Created once by the sampler and never changed.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub id: AgentId,
    pub mode: TravelMode,
    pub o_zone_id: ZoneId,
    pub d_zone_id: ZoneId,
    pub o_node_id: NodeId,
    pub d_node_id: NodeId,
    /// Straight line between the two node coordinates.
    pub geometry: LineString,
    pub departure_time: DepartureTime,
}
