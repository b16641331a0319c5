//! The ARTR codec as a loadable transform module.

use std::{sync::Arc, time::Duration};

use artr_core::{LoadError, ModuleLoader, TransformError, TransformModule};

/// Probe text for the initialization self-test.
const INIT_PROBE: &str = "本音と建前";

/// [`TransformModule`] backed by [`artr_codec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecModule;

impl TransformModule for CodecModule {
    fn encode(&self, input: &str) -> Result<String, TransformError> {
        Ok(artr_codec::encode(input))
    }

    fn decode(&self, input: &str) -> Result<String, TransformError> {
        artr_codec::decode(input).map_err(|err| TransformError::new(err.to_string()))
    }
}

/// Loads [`CodecModule`].
///
/// Waits `fetch_delay` to stand in for fetching the module, then runs a
/// self-test as the initialization entry point: the module is ready only if
/// it round-trips a probe string.
#[derive(Debug, Clone, Default)]
pub struct CodecLoader {
    fetch_delay: Duration,
}

impl CodecLoader {
    /// Loader with the given simulated fetch delay.
    pub fn new(fetch_delay: Duration) -> Self {
        Self { fetch_delay }
    }

    fn initialize(module: &CodecModule) -> Result<(), LoadError> {
        let encoded = module.encode(INIT_PROBE).map_err(|err| LoadError::Init(err.message))?;
        let decoded = module.decode(&encoded).map_err(|err| LoadError::Init(err.message))?;
        if decoded == INIT_PROBE {
            Ok(())
        } else {
            Err(LoadError::Init(format!("self-test returned {decoded:?}")))
        }
    }
}

impl ModuleLoader for CodecLoader {
    async fn load(&self) -> Result<Arc<dyn TransformModule>, LoadError> {
        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }

        let module = CodecModule;
        Self::initialize(&module)?;
        tracing::debug!(delay = ?self.fetch_delay, "codec module initialized");
        Ok(Arc::new(module))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_carry_codec_message() {
        let err = CodecModule.decode("あ").unwrap_err();
        assert_eq!(err.to_string(), "`あ` という文字は使えません");
    }

    #[test]
    fn encode_matches_codec() {
        assert_eq!(CodecModule.encode("A").unwrap(), "愛楽愛");
    }

    #[tokio::test]
    async fn loader_produces_working_module() {
        let module = CodecLoader::default().load().await.unwrap();
        let encoded = module.encode("hello").unwrap();
        assert_eq!(module.decode(&encoded).unwrap(), "hello");
    }
}
