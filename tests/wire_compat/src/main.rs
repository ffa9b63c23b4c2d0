fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;

    use futures_util::{SinkExt, StreamExt};
    use serde::Deserialize;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;
    use tokio_tungstenite::tungstenite::Message;

    use relay_console_connection::{
        ConnectOutcome, ConnectionManager, Connector, InboundEvent, ManagerOptions, ManagerState,
        SendOutcome, SessionEvent, WsConnector,
    };
    use relay_console_protocol::{PageLocation, RelayCommand, split_payload};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads and deserializes a fixture file.
    fn load_fixture<T: serde::de::DeserializeOwned>(name: &str) -> T {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    #[derive(Deserialize)]
    struct EndpointCase {
        location: PageLocation,
        endpoint: String,
    }

    #[derive(Deserialize)]
    struct PageUrlCase {
        url: String,
        endpoint: String,
    }

    #[derive(Deserialize)]
    struct SplitCase {
        payload: String,
        segments: Vec<String>,
    }

    #[derive(Deserialize)]
    struct Commands {
        on: String,
        off: String,
    }

    // --- Fixture tests ---

    #[test]
    fn fixture_endpoint_derivation() {
        let cases: Vec<EndpointCase> = load_fixture("endpoint_derivation.json");
        for case in cases {
            assert_eq!(
                case.location.websocket_endpoint(),
                case.endpoint,
                "location {:?}",
                case.location
            );
        }
    }

    #[test]
    fn fixture_page_urls() {
        let cases: Vec<PageUrlCase> = load_fixture("page_urls.json");
        for case in cases {
            let location = PageLocation::parse(&case.url)
                .unwrap_or_else(|e| panic!("failed to parse {}: {e}", case.url));
            assert_eq!(location.websocket_endpoint(), case.endpoint, "url {}", case.url);
        }
    }

    #[test]
    fn fixture_payload_split() {
        let cases: Vec<SplitCase> = load_fixture("payload_split.json");
        for case in cases {
            let got: Vec<&str> = split_payload(&case.payload).collect();
            assert_eq!(got, case.segments, "payload {:?}", case.payload);
        }
    }

    #[test]
    fn fixture_commands() {
        let commands: Commands = load_fixture("commands.json");
        assert_eq!(RelayCommand::On.as_wire(), commands.on);
        assert_eq!(RelayCommand::Off.as_wire(), commands.off);
    }

    // --- Live socket tests ---

    /// Feeds events into the manager until `done` holds.
    async fn pump_until<C: Connector>(
        manager: &mut ConnectionManager<C>,
        events: &mut mpsc::Receiver<InboundEvent>,
        done: impl Fn(&ConnectionManager<C>) -> bool,
    ) {
        while !done(&*manager) {
            let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
                .await
                .expect("event in time")
                .expect("event channel open");
            manager.handle_event(event);
        }
    }

    #[tokio::test]
    async fn end_to_end_scenario() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (received_tx, mut received_rx) = mpsc::channel::<String>(4);

        let server = tokio::spawn(async move {
            // First session: push two lines, wait for one command, then close.
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            ws.send(Message::Text("t1;;t2".into())).await.unwrap();
            while let Some(Ok(msg)) = ws.next().await {
                if let Message::Text(text) = msg {
                    received_tx.send(text.as_str().to_owned()).await.unwrap();
                    break;
                }
            }
            ws.close(None).await.unwrap();
            while let Some(Ok(_)) = ws.next().await {}

            // Second session: just complete the handshake.
            let (stream, _) = listener.accept().await.unwrap();
            tokio_tungstenite::accept_async(stream).await.unwrap()
        });

        let location = PageLocation::new("http:", addr.to_string(), "/");
        let mut manager =
            ConnectionManager::new(WsConnector::new(), location, ManagerOptions::default());
        let mut events = manager.take_events().unwrap();

        assert!(matches!(
            manager.connect().unwrap(),
            ConnectOutcome::Started(_)
        ));
        pump_until(&mut manager, &mut events, |m| m.log().len() == 2).await;

        let texts: Vec<&str> = manager.log().iter().map(|e| e.text()).collect();
        assert_eq!(texts, vec!["t1", "t2"]);
        assert_eq!(
            manager.log().get(0).unwrap().timestamp(),
            manager.log().get(1).unwrap().timestamp()
        );

        assert_eq!(manager.send_command(RelayCommand::Off), SendOutcome::Sent);
        let received = tokio::time::timeout(Duration::from_secs(5), received_rx.recv())
            .await
            .expect("command in time")
            .expect("server alive");
        assert_eq!(received, "serverTcpOff");

        pump_until(&mut manager, &mut events, |m| !m.is_connected()).await;
        assert_eq!(manager.state(), ManagerState::Idle);

        assert!(matches!(
            manager.connect().unwrap(),
            ConnectOutcome::Started(_)
        ));
        pump_until(&mut manager, &mut events, |m| {
            matches!(m.state(), ManagerState::Open(_))
        })
        .await;

        let _second = server.await.unwrap();
        assert_eq!(manager.log().len(), 2);
    }

    #[tokio::test]
    async fn duplicate_connect_opens_one_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            ws.send(Message::Text("only one".into())).await.unwrap();
            // A second socket would be accepted here if the guard failed.
            let extra =
                tokio::time::timeout(Duration::from_millis(300), listener.accept()).await;
            (ws, extra.is_ok())
        });

        let location = PageLocation::new("http:", addr.to_string(), "/");
        let mut manager =
            ConnectionManager::new(WsConnector::new(), location, ManagerOptions::default());
        let mut events = manager.take_events().unwrap();

        let first = manager.connect().unwrap();
        let second = manager.connect().unwrap();
        let ConnectOutcome::Started(id) = first else {
            panic!("first connect should start a session");
        };
        assert_eq!(second, ConnectOutcome::AlreadyConnected(id));

        pump_until(&mut manager, &mut events, |m| m.log().len() == 1).await;

        let (_ws, extra_accepted) = server.await.unwrap();
        assert!(!extra_accepted);
    }

    #[tokio::test]
    async fn command_sent_during_handshake_is_delivered() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let mut first = None;
            while let Some(Ok(msg)) = ws.next().await {
                if let Message::Text(text) = msg {
                    first = Some(text.as_str().to_owned());
                    break;
                }
            }
            (ws, first)
        });

        let location = PageLocation::new("http:", addr.to_string(), "/");
        let mut manager =
            ConnectionManager::new(WsConnector::new(), location, ManagerOptions::default());
        let mut events = manager.take_events().unwrap();

        let ConnectOutcome::Started(id) = manager.connect().unwrap() else {
            panic!("connect should start a session");
        };
        assert_eq!(manager.state(), ManagerState::Connecting(id));
        assert_eq!(manager.send_command(RelayCommand::On), SendOutcome::Sent);
        assert_eq!(
            manager.connect().unwrap(),
            ConnectOutcome::AlreadyConnected(id)
        );

        let (_ws, first) = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server in time")
            .unwrap();
        assert_eq!(first.as_deref(), Some("serverTcpOn"));

        // Exactly one open notification for the single session.
        let mut opened = 0;
        while let Ok(Some(event)) =
            tokio::time::timeout(Duration::from_millis(300), events.recv()).await
        {
            if event.event == SessionEvent::Opened {
                assert_eq!(event.session, id);
                opened += 1;
            }
            manager.handle_event(event);
        }
        assert_eq!(opened, 1);
        assert!(manager.log().is_empty());
    }
}
