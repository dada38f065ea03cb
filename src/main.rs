use app_config::{AppConfig, CLAP_ARGS};
use twitch_chat_ingest::errors::STARTUP_FAILURE_EXIT_CODE;
use twitch_chat_ingest::logging::setup_logging_config;
use twitch_chat_ingest::processes::run_main_process;
use twitch_chat_ingest::profiling::Profilers;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOCATOR: dhat::Alloc = dhat::Alloc;

#[tokio::main]
async fn main() {
  let cpu_profile_path = CLAP_ARGS.cpu_profile_path();
  let memory_profile_path = CLAP_ARGS.memory_profile_path();

  let config = match AppConfig::load() {
    Ok(config) => config,
    Err(error) => {
      eprintln!("Failed to load the config: {:?}", error);

      std::process::exit(STARTUP_FAILURE_EXIT_CODE);
    }
  };

  if let Err(error) = setup_logging_config(&config) {
    eprintln!("Failed to set up logging: {}", error);

    std::process::exit(STARTUP_FAILURE_EXIT_CODE);
  }

  let profilers = match Profilers::start(cpu_profile_path, memory_profile_path) {
    Ok(profilers) => profilers,
    Err(error) => {
      tracing::error!("{}", error);
      eprintln!("{}", error);

      std::process::exit(STARTUP_FAILURE_EXIT_CODE);
    }
  };

  let result = run_main_process(&config).await;

  if let Err(error) = profilers.finish() {
    tracing::error!("{}", error);
  }

  if let Err(error) = result {
    tracing::error!("{} Exiting the program.", error);
    eprintln!("{}", error);

    std::process::exit(error.exit_code());
  }

  tracing::info!("Stopped.");
}
