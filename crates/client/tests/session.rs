use std::cell::RefCell;
use std::rc::Rc;

use client_comm::{CommConfig, Inbound};
use client_options::{OptionValue, OptionsError, OptionsHandle};
use webtiles_client::{Client, ClientConfig};

fn frame(raw: &str) -> Inbound {
    Inbound::Frame(raw.to_string())
}

#[tokio::test]
async fn session_syncs_updates_and_clears_on_close() {
    let mut client = Client::builder().build();
    let options = client.options().clone();

    let history = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&history);
    options
        .add_listener(move |view| {
            sink.borrow_mut().push(view.get("tile_font_size")?.clone());
            Ok(())
        })
        .unwrap();

    let (tx, rx) = client.channel();
    tx.send(frame(r#"{"msg":"options","options":{"tile_font_size":16}}"#))
        .await
        .unwrap();
    tx.send(frame(r#"{"msg":"set_option","name":"tile_font_size","value":17}"#))
        .await
        .unwrap();
    tx.send(Inbound::Console("/set_option tile_font_size 18".into()))
        .await
        .unwrap();
    drop(tx);

    let stats = client.run(rx).await;

    assert_eq!(stats.delivered, 2);
    assert_eq!(stats.commands, 1);
    assert_eq!(stats.failed, 0);
    assert_eq!(options.get("tile_font_size"), Ok(OptionValue::from(18)));
    assert_eq!(
        *history.borrow(),
        vec![
            OptionValue::from(16),
            OptionValue::from(17),
            OptionValue::from(18)
        ]
    );

    let (tx, rx) = client.channel();
    tx.send(frame(r#"{"msg":"close"}"#)).await.unwrap();
    drop(tx);
    client.run(rx).await;

    assert_eq!(
        options.get("tile_font_size"),
        Err(OptionsError::NotInitialized {
            name: "tile_font_size".into()
        })
    );
}

#[tokio::test]
async fn injected_store_is_shared_with_the_client() {
    let options = OptionsHandle::default();
    let mut client = Client::builder().options(options.clone()).build();

    let (tx, rx) = client.channel();
    tx.send(frame(r#"{"msg":"options","options":{"show_game_time":true}}"#))
        .await
        .unwrap();
    drop(tx);
    client.run(rx).await;

    assert_eq!(options.get("show_game_time"), Ok(OptionValue::Bool(true)));
}

#[tokio::test]
async fn strict_config_counts_unknown_kinds_as_failures() {
    let config = ClientConfig::new(CommConfig {
        inbound_buffer: 4,
        strict: true,
    });
    let mut client = Client::builder().config(config).build();

    let (tx, rx) = client.channel();
    tx.send(frame(r#"{"msg":"lobby_entry"}"#)).await.unwrap();
    drop(tx);
    let stats = client.run(rx).await;

    assert_eq!(stats.failed, 1);
    assert_eq!(stats.dropped, 0);
}

#[test]
fn builder_wires_option_and_close_handlers() {
    let client = Client::builder().build();

    let mut kinds: Vec<&str> = client.dispatcher().kinds().collect();
    kinds.sort_unstable();

    assert_eq!(kinds, vec!["close", "options", "set_option"]);
}
