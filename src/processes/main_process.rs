use crate::channel::TrackedChannels;
use crate::errors::AppError;
use crate::irc_chat::{connection, ChannelJoiner};
use crate::message_store::{DatabaseMessageStore, MessageStore};
use crate::processes::message_consumer::MessageConsumer;
use app_config::AppConfig;
use database_connection::get_database_connection;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::mpsc;

/// Connects the database and the chat, then ingests until something fails or Ctrl-C is pressed.
///
/// Ctrl-C is the only way this returns `Ok`.
pub async fn run_main_process(config: &AppConfig) -> Result<(), AppError> {
  tracing::info!("Starting main process as {}.", config.display_name());

  let database_connection = get_database_connection(config)
    .await
    .map_err(AppError::DatabaseConnectionFailed)?;
  let message_store = DatabaseMessageStore::new(database_connection);
  let tracked_channels = TrackedChannels::new(config.channels());

  tracing::info!("Tracking {} channels.", tracked_channels.len());

  let (line_reader, command_writer) =
    connection::connect(&config.connection_credentials()).await?;

  let channel_joiner = ChannelJoiner::new(
    line_reader,
    command_writer,
    tracked_channels.channel_names(),
  );
  let message_consumer = MessageConsumer::new(
    message_store,
    tracked_channels,
    config.bot_marker(),
    config.store_raw_lines(),
  );

  tracing::info!("Running main process.");

  tokio::select! {
    result = run_ingest_pipeline(channel_joiner, message_consumer, config.queue_capacity()) => result,
    signal = tokio::signal::ctrl_c() => {
      signal.map_err(AppError::SignalListenerFailed)?;
      tracing::info!("Received Ctrl-C. Stopping.");

      Ok(())
    }
  }
}

/// Runs the channel reader on its own task and the consumer on this one, joined by
/// a bounded queue.
///
/// Returns the first failure. A reader failure is reported once the consumer has
/// stored everything already queued.
pub async fn run_ingest_pipeline<R, W, S>(
  channel_joiner: ChannelJoiner<R, W>,
  message_consumer: MessageConsumer<S>,
  queue_capacity: usize,
) -> Result<(), AppError>
where
  R: AsyncBufRead + Unpin + Send + 'static,
  W: AsyncWrite + Unpin + Send + 'static,
  S: MessageStore,
{
  let (raw_line_sender, raw_line_receiver) = mpsc::channel(queue_capacity.max(1));
  let reader_handle = tokio::spawn(channel_joiner.run(raw_line_sender));

  if let Err(error) = message_consumer.run(raw_line_receiver).await {
    reader_handle.abort();

    return Err(error);
  }

  reader_handle.await?
}
