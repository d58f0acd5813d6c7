use std::fs;
use std::path::{Path, PathBuf};

/// Write `bytes` to `root/rel`, creating parent directories
#[allow(dead_code)]
pub fn write_file(root: &Path, rel: &str, bytes: &[u8]) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, bytes).unwrap();
    path
}

/// Deterministic pseudo-random bytes; distinct seeds give distinct content
#[allow(dead_code)]
pub fn patterned_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as u8
        })
        .collect()
}

/// A PBS job output file with the resource-usage footer
#[allow(dead_code)]
pub const PBS_EXAMPLE: &str = "Some\n\
random\n\
text\n\n\
======================================================================================\n\
                  Resource Usage on 2022-11-17 10:08:57:\n\
   Job Id:             63911854.gadi-pbs\n\
   Project:            tm70\n\
   Exit Status:        0\n\
   Service Units:      123.45\n\
   NCPUs Requested:    234                    NCPUs Used: 123\n\
                                           CPU Time Used: 20:30:00\n\
   Memory Requested:   1.5TB                 Memory Used: 200GB\n\
   Walltime requested: 01:00:00            Walltime Used: 00:30:36\n\
   JobFS requested:    1.00KB                 JobFS used: 0.00MB\n\
======================================================================================\n";
