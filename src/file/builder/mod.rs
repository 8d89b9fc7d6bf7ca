use super::SoundFont;
use crate::{
    BankError, ChunkError,
    file::{InfoBlock, ListKind, PresetTables, SampleData},
};

/// A builder used to create a new [`SoundFont`].
///
/// Blocks may arrive in any order; each may arrive at most once.
#[derive(Default)]
pub struct SoundFontBuilder {
    info: Option<InfoBlock>,
    sample_data: Option<SampleData>,
    preset_tables: Option<PresetTables>,
}

impl SoundFontBuilder {
    /// Handles a decoded `INFO` block.
    pub fn handle_info(&mut self, block: InfoBlock) -> Result<(), ChunkError> {
        if self.info.is_some() {
            return Err(ChunkError::DuplicateBlock(ListKind::Info));
        }
        self.info = Some(block);
        Ok(())
    }

    /// Handles a decoded `sdta` block.
    pub fn handle_sample_data(&mut self, samples: SampleData) -> Result<(), ChunkError> {
        if self.sample_data.is_some() {
            return Err(ChunkError::DuplicateBlock(ListKind::SampleData));
        }
        self.sample_data = Some(samples);
        Ok(())
    }

    /// Handles a decoded `pdta` block.
    pub fn handle_preset_tables(&mut self, tables: PresetTables) -> Result<(), ChunkError> {
        if self.preset_tables.is_some() {
            return Err(ChunkError::DuplicateBlock(ListKind::PresetData));
        }
        self.preset_tables = Some(tables);
        Ok(())
    }

    /// Attempts to finish the bank from the provided blocks.
    pub fn build(self) -> Result<SoundFont, BankError> {
        let Some(info) = self.info else {
            return Err(BankError::NoInfo);
        };
        let Some(sample_data) = self.sample_data else {
            return Err(BankError::NoSampleData);
        };
        let Some(preset_tables) = self.preset_tables else {
            return Err(BankError::NoPresetTables);
        };

        Ok(SoundFont {
            info,
            sample_data,
            preset_tables,
        })
    }
}
