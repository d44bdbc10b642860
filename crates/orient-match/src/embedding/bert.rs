use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

struct SentenceBertImpl {
    bert: BertModel,
    hidden_size: usize,
}

impl SentenceBertImpl {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), config)?
        } else {
            BertModel::load(vb.clone(), config)?
        };

        Ok(Self {
            bert,
            hidden_size: config.hidden_size,
        })
    }

    /// Runs the encoder and mean-pools token states over the attention mask.
    ///
    /// Shapes: `input_ids` / `token_type_ids` / `attention_mask` are
    /// `[1, seq_len]`; the output is `[hidden_size]`.
    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden = self
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;

        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.maximum(1e-9)?;

        summed.broadcast_div(&counts)?.squeeze(0)
    }
}

/// Sentence encoder backed by a BERT-family model loaded from safetensors.
#[derive(Clone)]
pub struct SentenceBert(std::sync::Arc<SentenceBertImpl>);

impl SentenceBert {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let model = SentenceBertImpl::load(vb, &config)?;

        Ok(Self(std::sync::Arc::new(model)))
    }

    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        self.0.forward(input_ids, token_type_ids, attention_mask)
    }

    pub fn hidden_size(&self) -> usize {
        self.0.hidden_size
    }
}
