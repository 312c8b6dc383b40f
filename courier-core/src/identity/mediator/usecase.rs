use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::{debug, error, info};

use tokio_util::sync::CancellationToken;

use super::events::{wait_for_event, EventFilter};
use super::handle::DisconnectHandle;
use super::types::{
    AcceptInvitationRequest, AgentBuilder, AgentError, ConnectorOptions, EventSourceBuilder,
    Invitation, MediatorAPI, MediatorClientBuilder, MediatorError, OutOfBandBuilder,
    RouterClientBuilder,
};

/// `Usecase` is base logic implementation for the [`MediatorAPI`]
///
/// This object depends on an implementation of [`RouterClientBuilder`] used to fetch the router
/// invitation, and on the agent capabilities provided through [`AgentBuilder`]. It holds no
/// mutable state, concurrent `connect` calls run as independent handshakes
pub struct Usecase<TRouter, TAgent>
where
    TRouter: RouterClientBuilder,
    TAgent: AgentBuilder,
{
    router: TRouter,
    agent: TAgent,
    options: ConnectorOptions,
}

impl<TRouter, TAgent> Usecase<TRouter, TAgent>
where
    TRouter: RouterClientBuilder,
    TAgent: AgentBuilder,
{
    pub fn new(router: TRouter, agent: TAgent) -> Self {
        Self::with_options(router, agent, ConnectorOptions::default())
    }

    pub fn with_options(router: TRouter, agent: TAgent, options: ConnectorOptions) -> Self {
        Self {
            router,
            agent,
            options,
        }
    }

    pub fn options(&self) -> &ConnectorOptions {
        &self.options
    }
}

#[async_trait]
impl<TRouter, TAgent> MediatorAPI for Usecase<TRouter, TAgent>
where
    TRouter: RouterClientBuilder,
    TAgent: AgentBuilder,
{
    type MediatorImplementer = TAgent::MediatorImplementer;

    async fn connect(
        &self,
        endpoint: String,
    ) -> Result<DisconnectHandle<Self::MediatorImplementer>, MediatorError> {
        self.connect_with_cancel(endpoint, CancellationToken::new())
            .await
    }

    async fn connect_with_cancel(
        &self,
        endpoint: String,
        cancel: CancellationToken,
    ) -> Result<DisconnectHandle<Self::MediatorImplementer>, MediatorError> {
        debug!("[mediator:connect] endpoint: {}", endpoint);

        let invitation = self
            .router
            .create_invitation(endpoint, self.options.router_label.to_owned())
            .await?;

        // the completion may be published before accept_invitation returns
        let mut receiver = self.agent.events().subscribe();

        let request = AcceptInvitationRequest {
            my_label: self.options.agent_label.to_owned(),
            invitation,
        };

        let accepted = self
            .agent
            .outofband()
            .accept_invitation(request)
            .await
            .map_err(|err| MediatorError::ProtocolError(err.to_string()))?;

        let connection_id = accepted.connection_id;
        debug!("[mediator:connect] invitation accepted: {}", connection_id);

        let filter = EventFilter::did_exchange_completed(connection_id.clone());
        let _ = wait_for_event(
            &mut receiver,
            &filter,
            self.options.completion_timeout,
            &cancel,
        )
        .await?;

        let mediator = self.agent.mediator();
        mediator
            .register(connection_id.clone())
            .await
            .map_err(|err| MediatorError::ProtocolError(err.to_string()))?;

        match mediator.get_connection().await {
            Ok(connection) => info!(
                "[mediator:connect] router registered successfully: {}",
                connection.connection_id
            ),
            Err(AgentError::RouterNotRegistered) => debug!(
                "[mediator:connect] registration still pending: {}",
                connection_id
            ),
            Err(err) => return Err(MediatorError::ProtocolError(err.to_string())),
        }

        Ok(DisconnectHandle::new(mediator))
    }

    async fn reconnect(&self) {
        let mediator = self.agent.mediator();

        let connection = match mediator.get_connection().await {
            Ok(connection) => connection,
            Err(err) => {
                error!("[mediator:reconnect] unable to reconnect to router: {}", err);
                return;
            }
        };

        if let Err(err) = mediator.reconnect(connection.connection_id).await {
            error!("[mediator:reconnect] unable to reconnect to router: {}", err);
            return;
        }

        debug!("[mediator:reconnect] router reconnected");
    }

    async fn is_already_connected(&self) -> Result<bool, MediatorError> {
        match self.agent.mediator().get_connection().await {
            Ok(connection) => Ok(!connection.connection_id.is_empty()),
            Err(AgentError::RouterNotRegistered) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn create_invitation(&self) -> Result<Invitation, MediatorError> {
        self.agent
            .outofband()
            .create_invitation(self.options.invitation_label.to_owned())
            .await
            .map_err(|err| MediatorError::ProtocolError(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use mockall::mock;
    use mockall::predicate::eq;

    use rst_common::standard::serde_json::json;
    use rst_common::with_tokio::tokio;
    use rst_common::with_tokio::tokio::sync::broadcast::{self, Receiver, Sender};

    use crate::identity::mediator::events::{AgentEvent, EventType};
    use crate::identity::mediator::types::{
        AcceptInvitationResponse, ConnectionID, MediatorConnection, DEFAULT_AGENT_LABEL,
        DEFAULT_INVITATION_LABEL, DEFAULT_ROUTER_LABEL, STATE_COMPLETED,
        TOPIC_DIDEXCHANGE_STATES,
    };
    use crate::identity::mediator::Agent;

    mock!(
        FakeRouter{}

        #[async_trait]
        impl RouterClientBuilder for FakeRouter {
            async fn create_invitation(
                &self,
                endpoint: String,
                label: String,
            ) -> Result<Invitation, MediatorError>;
        }
    );

    mock!(
        FakeOutOfBand{}

        #[async_trait]
        impl OutOfBandBuilder for FakeOutOfBand {
            async fn accept_invitation(
                &self,
                request: AcceptInvitationRequest,
            ) -> Result<AcceptInvitationResponse, AgentError>;

            async fn create_invitation(&self, label: String) -> Result<Invitation, AgentError>;
        }
    );

    mock!(
        FakeMediator{}

        #[async_trait]
        impl MediatorClientBuilder for FakeMediator {
            async fn register(&self, connection_id: ConnectionID) -> Result<(), AgentError>;
            async fn unregister(&self) -> Result<(), AgentError>;
            async fn get_connection(&self) -> Result<MediatorConnection, AgentError>;
            async fn reconnect(&self, connection_id: ConnectionID) -> Result<(), AgentError>;
        }
    );

    mock!(
        FakeEvents{}

        impl EventSourceBuilder for FakeEvents {
            fn subscribe(&self) -> Receiver<AgentEvent>;
        }
    );

    type FakeAgent = Agent<MockFakeOutOfBand, MockFakeMediator, MockFakeEvents>;

    const ROUTER_ENDPOINT: &str = "https://router.example/agent";

    fn generate_usecase(
        router: MockFakeRouter,
        outofband: MockFakeOutOfBand,
        mediator: MockFakeMediator,
        events: MockFakeEvents,
        options: ConnectorOptions,
    ) -> Usecase<MockFakeRouter, FakeAgent> {
        let agent = Agent::new(outofband, mediator, events);
        Usecase::with_options(router, agent, options)
    }

    fn generate_invitation() -> Invitation {
        Invitation::from(json!({"type": "oob", "id": "abc"}))
    }

    fn generate_events(tx: &Sender<AgentEvent>) -> MockFakeEvents {
        let tx_subscriber = tx.clone();
        let mut events = MockFakeEvents::new();
        events
            .expect_subscribe()
            .times(1)
            .returning(move || tx_subscriber.subscribe());

        events
    }

    fn conn_id(id: &str) -> ConnectionID {
        ConnectionID::from(id.to_string())
    }

    fn completed_event(id: &str) -> AgentEvent {
        AgentEvent::new(
            EventType::PostState,
            STATE_COMPLETED,
            conn_id(id),
            TOPIC_DIDEXCHANGE_STATES,
        )
    }

    fn generate_router() -> MockFakeRouter {
        let mut router = MockFakeRouter::new();
        router
            .expect_create_invitation()
            .with(
                eq(ROUTER_ENDPOINT.to_string()),
                eq(DEFAULT_ROUTER_LABEL.to_string()),
            )
            .times(1)
            .returning(|_, _| Ok(generate_invitation()));

        router
    }

    fn generate_outofband_completed(tx: &Sender<AgentEvent>) -> MockFakeOutOfBand {
        let tx_publisher = tx.clone();
        let mut outofband = MockFakeOutOfBand::new();
        outofband
            .expect_accept_invitation()
            .withf(|request: &AcceptInvitationRequest| {
                request.my_label == DEFAULT_AGENT_LABEL
                    && request.invitation == generate_invitation()
            })
            .times(1)
            .returning(move |_| {
                let _ = tx_publisher.send(completed_event("conn-1"));
                Ok(AcceptInvitationResponse {
                    connection_id: conn_id("conn-1"),
                })
            });

        outofband
    }

    #[tokio::test]
    async fn test_connect_success() {
        let (tx, _) = broadcast::channel(16);

        let router = generate_router();
        let outofband = generate_outofband_completed(&tx);
        let events = generate_events(&tx);

        let mut mediator = MockFakeMediator::new();
        mediator
            .expect_register()
            .with(eq(conn_id("conn-1")))
            .times(1)
            .returning(|_| Ok(()));
        mediator.expect_get_connection().times(1).returning(|| {
            Ok(MediatorConnection {
                connection_id: conn_id("conn-1"),
            })
        });
        mediator.expect_unregister().times(1).returning(|| Ok(()));

        let uc = generate_usecase(
            router,
            outofband,
            mediator,
            events,
            ConnectorOptions::default(),
        );

        let handle = uc.connect(ROUTER_ENDPOINT.to_string()).await;
        assert!(!handle.is_err());

        let disconnected = handle.unwrap().disconnect().await;
        assert!(!disconnected.is_err())
    }

    #[tokio::test]
    async fn test_connect_event_published_after_accept() {
        let (tx, _) = broadcast::channel(16);

        let router = generate_router();
        let events = generate_events(&tx);

        let tx_publisher = tx.clone();
        let mut outofband = MockFakeOutOfBand::new();
        outofband
            .expect_accept_invitation()
            .times(1)
            .returning(move |_| {
                let tx_delayed = tx_publisher.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    let _ = tx_delayed.send(completed_event("conn-2"));
                    let _ = tx_delayed.send(completed_event("conn-1"));
                });

                Ok(AcceptInvitationResponse {
                    connection_id: conn_id("conn-1"),
                })
            });

        let mut mediator = MockFakeMediator::new();
        mediator
            .expect_register()
            .with(eq(conn_id("conn-1")))
            .times(1)
            .returning(|_| Ok(()));
        mediator.expect_get_connection().times(1).returning(|| {
            Ok(MediatorConnection {
                connection_id: conn_id("conn-1"),
            })
        });

        let uc = generate_usecase(
            router,
            outofband,
            mediator,
            events,
            ConnectorOptions::default(),
        );

        let handle = uc.connect(ROUTER_ENDPOINT.to_string()).await;
        assert!(!handle.is_err())
    }

    #[tokio::test]
    async fn test_connect_network_error() {
        let mut router = MockFakeRouter::new();
        router
            .expect_create_invitation()
            .times(1)
            .returning(|_, _| Err(MediatorError::NetworkError("connection refused".to_string())));

        let mut outofband = MockFakeOutOfBand::new();
        outofband.expect_accept_invitation().times(0);

        let mut mediator = MockFakeMediator::new();
        mediator.expect_register().times(0);

        let mut events = MockFakeEvents::new();
        events.expect_subscribe().times(0);

        let uc = generate_usecase(
            router,
            outofband,
            mediator,
            events,
            ConnectorOptions::default(),
        );

        let handle = uc.connect(ROUTER_ENDPOINT.to_string()).await;
        assert!(handle.is_err());
        assert!(matches!(
            handle.err().unwrap(),
            MediatorError::NetworkError(_)
        ))
    }

    #[tokio::test]
    async fn test_connect_invitation_rejected() {
        let (tx, _) = broadcast::channel(16);

        let router = generate_router();
        let events = generate_events(&tx);

        let mut outofband = MockFakeOutOfBand::new();
        outofband
            .expect_accept_invitation()
            .times(1)
            .returning(|_| Err(AgentError::Rejected("invalid invitation".to_string())));

        let mut mediator = MockFakeMediator::new();
        mediator.expect_register().times(0);

        let uc = generate_usecase(
            router,
            outofband,
            mediator,
            events,
            ConnectorOptions::default(),
        );

        let handle = uc.connect(ROUTER_ENDPOINT.to_string()).await;
        assert!(handle.is_err());

        let err = handle.err().unwrap();
        assert!(matches!(err, MediatorError::ProtocolError(_)));
        assert!(err.to_string().contains("invalid invitation"))
    }

    #[tokio::test]
    async fn test_connect_timeout() {
        let (tx, _) = broadcast::channel(16);

        let router = generate_router();
        let events = generate_events(&tx);

        let mut outofband = MockFakeOutOfBand::new();
        outofband
            .expect_accept_invitation()
            .times(1)
            .returning(|_| {
                Ok(AcceptInvitationResponse {
                    connection_id: conn_id("conn-1"),
                })
            });

        let mut mediator = MockFakeMediator::new();
        mediator.expect_register().times(0);

        let options = ConnectorOptions {
            completion_timeout: Duration::from_millis(50),
            ..ConnectorOptions::default()
        };

        let uc = generate_usecase(router, outofband, mediator, events, options);

        let handle = uc.connect(ROUTER_ENDPOINT.to_string()).await;
        assert!(handle.is_err());
        assert_eq!(
            handle.err().unwrap(),
            MediatorError::Timeout(Duration::from_millis(50))
        )
    }

    #[tokio::test]
    async fn test_connect_cancelled() {
        let (tx, _) = broadcast::channel(16);

        let router = generate_router();
        let events = generate_events(&tx);

        let mut outofband = MockFakeOutOfBand::new();
        outofband
            .expect_accept_invitation()
            .times(1)
            .returning(|_| {
                Ok(AcceptInvitationResponse {
                    connection_id: conn_id("conn-1"),
                })
            });

        let mut mediator = MockFakeMediator::new();
        mediator.expect_register().times(0);

        let uc = generate_usecase(
            router,
            outofband,
            mediator,
            events,
            ConnectorOptions::default(),
        );

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let handle = uc
            .connect_with_cancel(ROUTER_ENDPOINT.to_string(), cancel)
            .await;
        assert!(handle.is_err());
        assert!(matches!(
            handle.err().unwrap(),
            MediatorError::Cancelled(_)
        ))
    }

    #[tokio::test]
    async fn test_connect_register_rejected() {
        let (tx, _) = broadcast::channel(16);

        let router = generate_router();
        let outofband = generate_outofband_completed(&tx);
        let events = generate_events(&tx);

        let mut mediator = MockFakeMediator::new();
        mediator
            .expect_register()
            .times(1)
            .returning(|_| Err(AgentError::Rejected("router refused".to_string())));
        mediator.expect_get_connection().times(0);

        let uc = generate_usecase(
            router,
            outofband,
            mediator,
            events,
            ConnectorOptions::default(),
        );

        let handle = uc.connect(ROUTER_ENDPOINT.to_string()).await;
        assert!(handle.is_err());
        assert!(matches!(
            handle.err().unwrap(),
            MediatorError::ProtocolError(_)
        ))
    }

    #[tokio::test]
    async fn test_connect_verify_not_registered_swallowed() {
        let (tx, _) = broadcast::channel(16);

        let router = generate_router();
        let outofband = generate_outofband_completed(&tx);
        let events = generate_events(&tx);

        let mut mediator = MockFakeMediator::new();
        mediator.expect_register().times(1).returning(|_| Ok(()));
        mediator
            .expect_get_connection()
            .times(1)
            .returning(|| Err(AgentError::RouterNotRegistered));

        let uc = generate_usecase(
            router,
            outofband,
            mediator,
            events,
            ConnectorOptions::default(),
        );

        let handle = uc.connect(ROUTER_ENDPOINT.to_string()).await;
        assert!(!handle.is_err())
    }

    #[tokio::test]
    async fn test_connect_verify_error_propagated() {
        let (tx, _) = broadcast::channel(16);

        let router = generate_router();
        let outofband = generate_outofband_completed(&tx);
        let events = generate_events(&tx);

        let mut mediator = MockFakeMediator::new();
        mediator.expect_register().times(1).returning(|_| Ok(()));
        mediator
            .expect_get_connection()
            .times(1)
            .returning(|| Err(AgentError::Unavailable("agent stopped".to_string())));

        let uc = generate_usecase(
            router,
            outofband,
            mediator,
            events,
            ConnectorOptions::default(),
        );

        let handle = uc.connect(ROUTER_ENDPOINT.to_string()).await;
        assert!(handle.is_err());

        let err = handle.err().unwrap();
        assert!(matches!(err, MediatorError::ProtocolError(_)));
        assert!(err.to_string().contains("agent stopped"))
    }

    #[tokio::test]
    async fn test_reconnect_success() {
        let mut mediator = MockFakeMediator::new();
        mediator.expect_get_connection().times(1).returning(|| {
            Ok(MediatorConnection {
                connection_id: conn_id("conn-1"),
            })
        });
        mediator
            .expect_reconnect()
            .with(eq(conn_id("conn-1")))
            .times(1)
            .returning(|_| Ok(()));

        let uc = generate_usecase(
            MockFakeRouter::new(),
            MockFakeOutOfBand::new(),
            mediator,
            MockFakeEvents::new(),
            ConnectorOptions::default(),
        );

        uc.reconnect().await
    }

    #[tokio::test]
    async fn test_reconnect_query_failure_not_propagated() {
        let mut mediator = MockFakeMediator::new();
        mediator
            .expect_get_connection()
            .times(1)
            .returning(|| Err(AgentError::RouterNotRegistered));
        mediator.expect_reconnect().times(0);

        let uc = generate_usecase(
            MockFakeRouter::new(),
            MockFakeOutOfBand::new(),
            mediator,
            MockFakeEvents::new(),
            ConnectorOptions::default(),
        );

        uc.reconnect().await
    }

    #[tokio::test]
    async fn test_reconnect_failure_not_propagated() {
        let mut mediator = MockFakeMediator::new();
        mediator.expect_get_connection().times(1).returning(|| {
            Ok(MediatorConnection {
                connection_id: conn_id("conn-1"),
            })
        });
        mediator
            .expect_reconnect()
            .times(1)
            .returning(|_| Err(AgentError::Unavailable("offline".to_string())));

        let uc = generate_usecase(
            MockFakeRouter::new(),
            MockFakeOutOfBand::new(),
            mediator,
            MockFakeEvents::new(),
            ConnectorOptions::default(),
        );

        uc.reconnect().await
    }

    #[tokio::test]
    async fn test_is_already_connected_not_registered() {
        let mut mediator = MockFakeMediator::new();
        mediator
            .expect_get_connection()
            .times(1)
            .returning(|| Err(AgentError::RouterNotRegistered));

        let uc = generate_usecase(
            MockFakeRouter::new(),
            MockFakeOutOfBand::new(),
            mediator,
            MockFakeEvents::new(),
            ConnectorOptions::default(),
        );

        let connected = uc.is_already_connected().await;
        assert!(!connected.is_err());
        assert!(!connected.unwrap())
    }

    #[tokio::test]
    async fn test_is_already_connected_registered() {
        let mut mediator = MockFakeMediator::new();
        mediator.expect_get_connection().times(1).returning(|| {
            Ok(MediatorConnection {
                connection_id: conn_id("conn-1"),
            })
        });

        let uc = generate_usecase(
            MockFakeRouter::new(),
            MockFakeOutOfBand::new(),
            mediator,
            MockFakeEvents::new(),
            ConnectorOptions::default(),
        );

        let connected = uc.is_already_connected().await;
        assert!(!connected.is_err());
        assert!(connected.unwrap())
    }

    #[tokio::test]
    async fn test_is_already_connected_empty_connection_id() {
        let mut mediator = MockFakeMediator::new();
        mediator.expect_get_connection().times(1).returning(|| {
            Ok(MediatorConnection {
                connection_id: conn_id(""),
            })
        });

        let uc = generate_usecase(
            MockFakeRouter::new(),
            MockFakeOutOfBand::new(),
            mediator,
            MockFakeEvents::new(),
            ConnectorOptions::default(),
        );

        let connected = uc.is_already_connected().await;
        assert!(!connected.is_err());
        assert!(!connected.unwrap())
    }

    #[tokio::test]
    async fn test_is_already_connected_error_propagated() {
        let mut mediator = MockFakeMediator::new();
        mediator
            .expect_get_connection()
            .times(1)
            .returning(|| Err(AgentError::Unavailable("agent stopped".to_string())));

        let uc = generate_usecase(
            MockFakeRouter::new(),
            MockFakeOutOfBand::new(),
            mediator,
            MockFakeEvents::new(),
            ConnectorOptions::default(),
        );

        let connected = uc.is_already_connected().await;
        assert!(connected.is_err());
        assert!(matches!(
            connected.unwrap_err(),
            MediatorError::ProtocolError(_)
        ))
    }

    #[tokio::test]
    async fn test_create_invitation() {
        let mut outofband = MockFakeOutOfBand::new();
        outofband
            .expect_create_invitation()
            .with(eq(DEFAULT_INVITATION_LABEL.to_string()))
            .times(1)
            .returning(|_| Ok(generate_invitation()));

        let uc = generate_usecase(
            MockFakeRouter::new(),
            outofband,
            MockFakeMediator::new(),
            MockFakeEvents::new(),
            ConnectorOptions::default(),
        );

        let invitation = uc.create_invitation().await;
        assert!(!invitation.is_err());
        assert_eq!(invitation.unwrap().value()["id"], "abc")
    }

    #[tokio::test]
    async fn test_create_invitation_failed() {
        let mut outofband = MockFakeOutOfBand::new();
        outofband
            .expect_create_invitation()
            .times(1)
            .returning(|_| Err(AgentError::Unavailable("agent stopped".to_string())));

        let uc = generate_usecase(
            MockFakeRouter::new(),
            outofband,
            MockFakeMediator::new(),
            MockFakeEvents::new(),
            ConnectorOptions::default(),
        );

        let invitation = uc.create_invitation().await;
        assert!(invitation.is_err());
        assert!(matches!(
            invitation.unwrap_err(),
            MediatorError::ProtocolError(_)
        ))
    }
}
