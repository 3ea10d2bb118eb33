use std::{
    fmt::{self, Display},
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use thiserror::Error;

use crate::{GeneratorBox, ThrottleBox, client::Outcome, request::AspectRatio};

#[derive(Debug, Error)]
#[error("work item {0:?} has an empty prompt")]
pub struct EmptyPrompt(pub String);

/// One (prompt, filename) unit of batch work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub(crate) prompt: String,
    pub(crate) filename: String,
}

impl WorkItem {
    pub fn new(prompt: impl Into<String>, filename: impl Into<String>) -> Result<Self, EmptyPrompt> {
        let prompt = prompt.into();
        let filename = filename.into();
        if prompt.trim().is_empty() {
            return Err(EmptyPrompt(filename));
        }
        Ok(Self { prompt, filename })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub output_dir: PathBuf,
    pub aspect: AspectRatio,
}

pub struct BatchRunner {
    generator: GeneratorBox,
    throttle: ThrottleBox,
}

impl BatchRunner {
    pub fn new(generator: GeneratorBox, throttle: ThrottleBox) -> Self {
        Self {
            generator,
            throttle,
        }
    }

    /// Runs every item once, in order, one at a time. Failed items never
    /// stop the batch.
    pub async fn run<'i>(
        &mut self,
        items: impl IntoIterator<Item = &'i WorkItem>,
        config: &BatchConfig,
    ) -> Summary {
        let mut items = items.into_iter().peekable();
        let mut outcomes = vec![];
        info!(
            "Running batch against {} into {}",
            self.generator.name(),
            config.output_dir.display()
        );

        while let Some(item) = items.next() {
            let outcome = self
                .generator
                .generate(item, &config.output_dir, config.aspect)
                .await;
            if outcome.is_success() {
                info!("{}", outcome.message());
            } else {
                warn!("{}: {}", outcome.filename, outcome.message());
            }
            outcomes.push(outcome);

            if items.peek().is_some() {
                debug!("Pausing before next generation");
                self.throttle.pause().await;
            }
        }

        Summary { outcomes }
    }
}

/// All outcomes of a run, in work item order
#[derive(Debug)]
pub struct Summary {
    outcomes: Vec<Outcome>,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn successful(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

}

impl Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        writeln!(f, "Successful: {}/{total}", self.successful().count())?;
        for o in self.successful() {
            let path = o.filename();
            let name = Path::new(&*path).file_name().unwrap_or_default();
            writeln!(
                f,
                "  • {} ({} KB)",
                name.to_string_lossy(),
                o.size_kb().unwrap_or(0)
            )?;
        }

        let n_failed = self.failed().count();
        if n_failed > 0 {
            writeln!(f, "Failed: {n_failed}/{total}")?;
            for o in self.failed() {
                writeln!(f, "  • {}: {}", o.filename(), o.message())?;
            }
        }
        Ok(())
    }
}
