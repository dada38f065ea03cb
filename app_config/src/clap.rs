use clap::{Arg, Command};
use lazy_static::lazy_static;
use std::path::PathBuf;

lazy_static! {
  pub static ref CLAP_ARGS: ClapArgs = ClapArgs::new();
}

pub struct ClapArgs {
  args: clap::ArgMatches,
}

impl ClapArgs {
  const CPU_PROFILE: &'static str = "cpuprofile";
  const MEMORY_PROFILE: &'static str = "memprofile";

  pub fn new() -> Self {
    let args = Self::command().get_matches();

    Self { args }
  }

  pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
  where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
  {
    let args = Self::command().try_get_matches_from(args)?;

    Ok(Self { args })
  }

  /// Where to write the CPU profile on shutdown. Profiling is off when absent.
  pub fn cpu_profile_path(&self) -> Option<PathBuf> {
    self.args.get_one::<PathBuf>(Self::CPU_PROFILE).cloned()
  }

  /// Where to write the heap profile on shutdown. Profiling is off when absent.
  pub fn memory_profile_path(&self) -> Option<PathBuf> {
    self.args.get_one::<PathBuf>(Self::MEMORY_PROFILE).cloned()
  }

  fn command() -> Command {
    Command::new("Twitch Chat Ingest")
      .arg(
        Arg::new(Self::CPU_PROFILE)
          .long("cpuprofile")
          .value_name("FILE")
          .value_parser(clap::value_parser!(PathBuf))
          .action(clap::ArgAction::Set)
          .help("Writes a CPU profile flamegraph to this file when the program stops."),
      )
      .arg(
        Arg::new(Self::MEMORY_PROFILE)
          .long("memprofile")
          .value_name("FILE")
          .value_parser(clap::value_parser!(PathBuf))
          .action(clap::ArgAction::Set)
          .help("Writes a heap profile to this file when the program stops."),
      )
  }
}

impl Default for ClapArgs {
  fn default() -> Self {
    Self::new()
  }
}
