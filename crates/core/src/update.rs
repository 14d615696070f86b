use bitflags::bitflags;

bitflags! {
    /// Why an item's metadata is being saved. Several reasons may apply at once.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ItemUpdateType: u8 {
        const METADATA_IMPORT   = 0b0000_0001;
        const METADATA_DOWNLOAD = 0b0000_0010;
        const METADATA_EDIT     = 0b0000_0100;
        const IMAGE_UPDATE      = 0b0000_1000;
    }
}

impl ItemUpdateType {
    pub fn was_edited(self) -> bool {
        self.contains(Self::METADATA_EDIT)
    }

    pub fn was_downloaded(self) -> bool {
        self.contains(Self::METADATA_DOWNLOAD)
    }

    pub fn from_flags(edited: bool, downloaded: bool) -> Self {
        let mut update = Self::empty();
        update.set(Self::METADATA_EDIT, edited);
        update.set(Self::METADATA_DOWNLOAD, downloaded);
        update
    }
}
