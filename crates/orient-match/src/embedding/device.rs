use candle_core::Device;

use super::error::EmbeddingError;

/// Selects the compute device based on enabled features (falls back to CPU).
pub fn select_device() -> Result<Device, EmbeddingError> {
    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                tracing::info!("Using Metal GPU acceleration");
                return Ok(device);
            }
            Err(e) => tracing::warn!(error = %e, "Metal device unavailable"),
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                tracing::info!("Using CUDA GPU acceleration");
                return Ok(device);
            }
            Err(e) => tracing::warn!(error = %e, "CUDA device unavailable"),
        }
    }

    tracing::debug!("Using CPU device");
    Ok(Device::Cpu)
}
