use super::{AppState, build_router};
use crate::config::Config;
use anyhow::Result;
use axum::Router;
use geostash_derive::context;
use geostash_store::FeatureStore;
use std::net::SocketAddr;
use tokio::{sync::oneshot::Sender, task::JoinHandle};

pub struct FeatureServer {
	ip: String,
	port: u16,
	body_limit: usize,
	state: AppState,
	exit_signal: Option<Sender<()>>,
	join_handle: Option<JoinHandle<()>>,
	local_addr: Option<SocketAddr>,
}

impl FeatureServer {
	pub fn new(ip: &str, port: u16, state: AppState, body_limit: usize) -> FeatureServer {
		FeatureServer {
			ip: ip.to_owned(),
			port,
			body_limit,
			state,
			exit_signal: None,
			join_handle: None,
			local_addr: None,
		}
	}

	/// Opens the store named in `config` and prepares a server for it.
	#[context("creating server from config")]
	pub fn from_config(config: &Config) -> Result<FeatureServer> {
		let store = FeatureStore::open(&config.database.path(), config.database.pool_size())?;
		let state = AppState::new(store, &config.upload.dir());
		Ok(FeatureServer::new(
			config.server.ip(),
			config.server.port(),
			state,
			config.upload.body_limit(),
		))
	}

	pub fn router(&self) -> Router {
		build_router(self.state.clone(), self.body_limit)
	}

	/// Address the server listens on, once started. Useful with port 0.
	pub fn local_addr(&self) -> Option<SocketAddr> {
		self.local_addr
	}

	#[context("starting server on {}:{}", self.ip, self.port)]
	pub async fn start(&mut self) -> Result<()> {
		if self.exit_signal.is_some() {
			self.stop().await;
		}

		log::info!("starting server");

		let router = self.router();
		let addr = format!("{}:{}", self.ip, self.port);
		let listener = tokio::net::TcpListener::bind(&addr).await?;
		let local_addr = listener.local_addr()?;
		log::info!("server starts listening on {local_addr}");

		let (tx, rx) = tokio::sync::oneshot::channel::<()>();

		let join_handle = tokio::spawn(async move {
			let result = axum::serve(listener, router.into_make_service())
				.with_graceful_shutdown(async {
					rx.await.ok();
				})
				.await;
			if let Err(err) = result {
				log::error!("server stopped with error: {err}");
			}
		});

		self.exit_signal = Some(tx);
		self.join_handle = Some(join_handle);
		self.local_addr = Some(local_addr);

		Ok(())
	}

	pub async fn stop(&mut self) {
		let Some(exit_signal) = self.exit_signal.take() else {
			return;
		};

		log::info!("stopping server");

		let _ = exit_signal.send(());
		if let Some(join_handle) = self.join_handle.take() {
			if let Err(err) = join_handle.await {
				log::warn!("server task ended abnormally: {err}");
			}
		}
		self.local_addr = None;
	}
}
