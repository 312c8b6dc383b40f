use std::sync::Arc;

use super::types::{AgentBuilder, EventSourceBuilder, MediatorClientBuilder, OutOfBandBuilder};

/// `Agent` bundles the capabilities of an externally constructed agent
/// into a single [`AgentBuilder`] implementation
pub struct Agent<TOutOfBand, TMediator, TEvents>
where
    TOutOfBand: OutOfBandBuilder,
    TMediator: MediatorClientBuilder,
    TEvents: EventSourceBuilder,
{
    outofband: Arc<TOutOfBand>,
    mediator: Arc<TMediator>,
    events: Arc<TEvents>,
}

impl<TOutOfBand, TMediator, TEvents> Agent<TOutOfBand, TMediator, TEvents>
where
    TOutOfBand: OutOfBandBuilder,
    TMediator: MediatorClientBuilder,
    TEvents: EventSourceBuilder,
{
    pub fn new(outofband: TOutOfBand, mediator: TMediator, events: TEvents) -> Self {
        Self {
            outofband: Arc::new(outofband),
            mediator: Arc::new(mediator),
            events: Arc::new(events),
        }
    }
}

impl<TOutOfBand, TMediator, TEvents> Clone for Agent<TOutOfBand, TMediator, TEvents>
where
    TOutOfBand: OutOfBandBuilder,
    TMediator: MediatorClientBuilder,
    TEvents: EventSourceBuilder,
{
    fn clone(&self) -> Self {
        Self {
            outofband: self.outofband.clone(),
            mediator: self.mediator.clone(),
            events: self.events.clone(),
        }
    }
}

impl<TOutOfBand, TMediator, TEvents> AgentBuilder for Agent<TOutOfBand, TMediator, TEvents>
where
    TOutOfBand: OutOfBandBuilder,
    TMediator: MediatorClientBuilder,
    TEvents: EventSourceBuilder,
{
    type OutOfBandImplementer = TOutOfBand;
    type MediatorImplementer = TMediator;
    type EventsImplementer = TEvents;

    fn outofband(&self) -> Arc<TOutOfBand> {
        self.outofband.clone()
    }

    fn mediator(&self) -> Arc<TMediator> {
        self.mediator.clone()
    }

    fn events(&self) -> Arc<TEvents> {
        self.events.clone()
    }
}
