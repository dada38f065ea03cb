use crate::errors::AppError;
use std::fs::File;
use std::path::PathBuf;

const CPU_SAMPLING_FREQUENCY: i32 = 1000;

struct CpuProfiler {
  output_path: PathBuf,
  guard: pprof::ProfilerGuard<'static>,
}

/// Profilers requested on the command line. Their output is written by [`finish`](Self::finish).
pub struct Profilers {
  cpu_profiler: Option<CpuProfiler>,
  #[cfg(feature = "dhat-heap")]
  heap_profiler: Option<dhat::Profiler>,
}

impl Profilers {
  pub fn start(
    cpu_profile_path: Option<PathBuf>,
    memory_profile_path: Option<PathBuf>,
  ) -> Result<Self, AppError> {
    let cpu_profiler = match cpu_profile_path {
      Some(output_path) => {
        tracing::info!("Writing a CPU profile to {:?} on shutdown.", output_path);

        let guard = pprof::ProfilerGuardBuilder::default()
          .frequency(CPU_SAMPLING_FREQUENCY)
          .blocklist(&["libc", "libgcc", "pthread", "vdso"])
          .build()?;

        Some(CpuProfiler { output_path, guard })
      }
      None => None,
    };

    #[cfg(not(feature = "dhat-heap"))]
    warn_heap_profiling_unavailable(memory_profile_path);

    Ok(Self {
      cpu_profiler,
      #[cfg(feature = "dhat-heap")]
      heap_profiler: start_heap_profiler(memory_profile_path),
    })
  }

  /// Writes the CPU flamegraph, and the heap profile when enabled.
  pub fn finish(self) -> Result<(), AppError> {
    #[cfg(feature = "dhat-heap")]
    drop(self.heap_profiler);

    let Some(cpu_profiler) = self.cpu_profiler else {
      return Ok(());
    };

    let report = cpu_profiler.guard.report().build()?;
    let file = File::create(&cpu_profiler.output_path).map_err(|source| {
      AppError::FailedToWriteProfile {
        path: cpu_profiler.output_path.clone(),
        source,
      }
    })?;

    report.flamegraph(file)?;

    tracing::info!("Wrote the CPU profile to {:?}.", cpu_profiler.output_path);

    Ok(())
  }
}

#[cfg(feature = "dhat-heap")]
fn start_heap_profiler(memory_profile_path: Option<PathBuf>) -> Option<dhat::Profiler> {
  let output_path = memory_profile_path?;

  tracing::info!("Writing a heap profile to {:?} on shutdown.", output_path);

  Some(dhat::Profiler::builder().file_name(output_path).build())
}

#[cfg(not(feature = "dhat-heap"))]
fn warn_heap_profiling_unavailable(memory_profile_path: Option<PathBuf>) {
  if let Some(output_path) = memory_profile_path {
    tracing::warn!(
      "Heap profiling needs the `dhat-heap` feature. Not writing a heap profile to {:?}.",
      output_path
    );
  }
}
