// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::StreamExt;
use tokio::{net::TcpStream, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use watchkv_core::{Config, Path};
use watchkv_store::{KeyValueStore, MemoryStore};
use watchkv_sub_server::Server;
use watchkv_testing::wait::wait_for;

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub fn local_config() -> Config {
	Config {
		bind_host: "127.0.0.1".parse().unwrap(),
		port: 0,
		..Config::default()
	}
}

pub async fn start(config: Config) -> (Server, SocketAddr) {
	start_with_store(config, Arc::new(MemoryStore::new())).await
}

pub async fn start_with_store(config: Config, store: Arc<dyn KeyValueStore>) -> (Server, SocketAddr) {
	let mut server = Server::new(config, store);
	let addr = server.start().await.unwrap();
	(server, addr)
}

pub fn url(addr: SocketAddr, path: &str) -> String {
	format!("http://{addr}{path}")
}

/// Open a watcher on `path` and wait until the server has registered it.
pub async fn watch(server: &Server, addr: SocketAddr, path: &str) -> Client {
	let before = server.registry().subscribers_on(&Path::from(path));
	let (client, _) = connect_async(format!("ws://{addr}{path}")).await.unwrap();
	let registry = Arc::clone(server.registry());
	let key = Path::from(path);
	wait_for(move || registry.subscribers_on(&key) > before, "watcher was not registered").await;
	client
}

/// Next text frame, failing the test if none arrives in time.
pub async fn next_text(client: &mut Client) -> String {
	loop {
		let frame = timeout(Duration::from_secs(5), client.next())
			.await
			.expect("timed out waiting for a frame")
			.expect("connection ended")
			.unwrap();
		if let Message::Text(text) = frame {
			return text.to_string();
		}
	}
}

/// Assert that no text frame arrives within a short window.
pub async fn assert_silent(client: &mut Client) {
	match timeout(Duration::from_millis(100), client.next()).await {
		Err(_) => {}
		Ok(frame) => panic!("unexpected frame: {frame:?}"),
	}
}
