// Licensed under the Apache-2.0 license

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashDeviceConfig {
    pub partitions: &'static [&'static FlashPartition], // partitions on the flash device
}

impl FlashDeviceConfig {
    /// Look up a partition by its flash area id.
    pub fn partition(&self, id: u8) -> Option<&'static FlashPartition> {
        self.partitions.iter().copied().find(|p| p.id == id)
    }

    /// Look up a partition by name.
    pub fn partition_by_name(&self, name: &str) -> Option<&'static FlashPartition> {
        self.partitions.iter().copied().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub struct FlashPartition {
    pub name: &'static str, // name of the partition
    pub id: u8,             // flash area id
    pub offset: usize,      // flash partition offset in bytes
    pub size: usize,        // size in bytes
}

impl FlashPartition {
    /// Absolute end of the partition on the device, or `None` if it overflows.
    pub fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.size)
    }

    /// Whether `len` bytes starting at partition-relative `offset` stay inside the partition.
    pub fn contains(&self, offset: usize, len: usize) -> bool {
        offset
            .checked_add(len)
            .is_some_and(|end| end <= self.size)
    }
}
