use std::{future::IntoFuture, sync::Arc};

use axum::{Router, extract::Path, http::StatusCode, response::Html, routing};
use tokio::{
	net::TcpListener,
	sync::{oneshot, oneshot::Sender},
};

use lexa_bot::{Bot, DEGRADED_CORPUS_WARNING, FAILURE_NOTICE, Flow, dialogue::Dialogue};
use lexa_config::Corpus;
use lexa_service::{DefaultCorpusSource, RetrievalSettings, Session};
use lexa_storage::{
	BoxFuture, Error as StorageError, TopicStore, memory::MemoryTopicStore, models::UserTopic,
};

const CAT_PAGE: &str = "<html><body><p>The cat sat on the mat.</p>\
<p>Dogs bark at the postman.</p></body></html>";
const PARIS_PAGE: &str = "<p>Paris is the capital of France.</p>";

struct OfflineStore;
impl TopicStore for OfflineStore {
	fn get_or_create<'a>(
		&'a self,
		_user_id: &'a str,
	) -> BoxFuture<'a, lexa_storage::Result<UserTopic>> {
		Box::pin(async { Err(StorageError::InvalidArgument("store is offline.".to_string())) })
	}

	fn set_topic<'a>(
		&'a self,
		_user_id: &'a str,
		_topic: &'a str,
	) -> BoxFuture<'a, lexa_storage::Result<UserTopic>> {
		Box::pin(async { Err(StorageError::InvalidArgument("store is offline.".to_string())) })
	}
}

async fn start_wiki_server() -> (String, Sender<()>) {
	let app = Router::new().route("/wiki/{topic}", routing::get(page_handler));
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind wiki server.");
	let addr = listener.local_addr().expect("Failed to read wiki server address.");
	let (tx, rx) = oneshot::channel();
	let server = axum::serve(listener, app).with_graceful_shutdown(async move {
		let _ = rx.await;
	});

	tokio::spawn(async move {
		let _ = server.into_future().await;
	});

	(format!("http://{addr}/wiki"), tx)
}

async fn page_handler(Path(topic): Path<String>) -> (StatusCode, Html<&'static str>) {
	match topic.as_str() {
		"Cat" => (StatusCode::OK, Html(CAT_PAGE)),
		"Paris" => (StatusCode::OK, Html(PARIS_PAGE)),
		_ => (StatusCode::INTERNAL_SERVER_ERROR, Html("")),
	}
}

fn bot(api_base: String) -> Bot {
	bot_with_store(api_base, Arc::new(MemoryTopicStore::new("Cat")))
}

fn bot_with_store(api_base: String, store: Arc<dyn TopicStore>) -> Bot {
	let corpus = Corpus {
		source: lexa_config::SOURCE_ENCYCLOPEDIA.to_string(),
		api_base,
		file_root: None,
		timeout_ms: 5_000,
		user_agent: "lexa-test".to_string(),
		default_topic: "Cat".to_string(),
		default_headers: Default::default(),
	};
	let source = DefaultCorpusSource::from_config(&corpus).expect("Failed to build corpus source.");
	let session = Session::new(RetrievalSettings::default(), Arc::new(source))
		.expect("Default settings should be valid.");
	let dialogue = Dialogue::new(vec!["stop".to_string(), "bye".to_string()], true);

	Bot::new(session, store, "alice", dialogue)
}

async fn say(bot: &mut Bot, line: &str) -> Vec<String> {
	let (replies, flow) = bot.handle(line).await.expect("Line should be handled.");

	assert_eq!(flow, Flow::Continue);

	replies
}

#[tokio::test]
async fn answers_under_the_default_topic() {
	let (base, shutdown) = start_wiki_server().await;
	let mut bot = bot(base);

	assert_eq!(say(&mut bot, "/hello").await, vec!["Hello, alice!"]);
	assert_eq!(say(&mut bot, "/topic").await, vec!["We are talking about 'Cat'"]);
	assert_eq!(say(&mut bot, "where did the cat sit").await, vec!["The cat sat on the mat."]);

	let _ = shutdown.send(());
}

#[tokio::test]
async fn changing_topic_switches_the_corpus() {
	let (base, shutdown) = start_wiki_server().await;
	let mut bot = bot(base);

	assert_eq!(say(&mut bot, "/change_topic").await, vec!["Enter new topic:"]);
	assert_eq!(say(&mut bot, "Paris").await, vec!["Topic has been changed to 'Paris'"]);
	assert_eq!(
		say(&mut bot, "what is the capital of france").await,
		vec!["Paris is the capital of france."]
	);
	assert_eq!(say(&mut bot, "/change_topic").await, vec!["Enter new topic:"]);
	assert_eq!(say(&mut bot, "/cancel").await, vec!["Good bye"]);
	assert_eq!(say(&mut bot, "/topic").await, vec!["We are talking about 'Paris'"]);

	let _ = shutdown.send(());
}

#[tokio::test]
async fn unreachable_corpus_warns_before_the_fallback() {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind closed listener.");
	let addr = listener.local_addr().expect("Failed to read closed listener address.");

	drop(listener);

	let mut bot = bot(format!("http://{addr}/wiki"));

	assert_eq!(
		say(&mut bot, "where did the cat sit").await,
		vec![DEGRADED_CORPUS_WARNING.to_string(), "I'm sorry, I don't know it.".to_string()]
	);
}

#[tokio::test]
async fn exit_word_ends_the_chat() {
	let (base, shutdown) = start_wiki_server().await;
	let mut bot = bot(base);
	let (replies, flow) = bot.handle("Bye").await.expect("Line should be handled.");

	assert!(replies.is_empty());
	assert_eq!(flow, Flow::Exit);

	let _ = shutdown.send(());
}

#[tokio::test]
async fn store_failure_keeps_the_chat_going() {
	let (base, shutdown) = start_wiki_server().await;
	let mut bot = bot_with_store(base, Arc::new(OfflineStore));

	assert!(bot.handle("/topic").await.is_err());
	assert_eq!(bot.reply("/topic").await, (vec![FAILURE_NOTICE.to_string()], Flow::Continue));
	assert_eq!(
		bot.reply("where did the cat sit").await,
		(vec![FAILURE_NOTICE.to_string()], Flow::Continue)
	);
	assert_eq!(bot.reply("/hello").await, (vec!["Hello, alice!".to_string()], Flow::Continue));

	let _ = shutdown.send(());
}
