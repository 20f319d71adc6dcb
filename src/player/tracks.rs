// Normalized track metadata reported by a media backend
//
// A prepared resource is described as an ordered list of track groups,
// one group per elementary stream family, each holding its formats in
// index order. The snapshot is retained by the engine after discovery so
// selection can resolve group indices against it.

use serde::{Deserialize, Serialize};

/// Language tag reported when the container carries none
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// Codec identifier reported when the container carries none
pub const UNKNOWN_CODEC: &str = "unknown";

/// Media type of a track group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrackType {
    Audio,
    Video,
    Text,
    Unknown,
}

/// Format of a single elementary track as reported by the backend
///
/// All fields are optional or zero-defaulted; the descriptor conversion
/// applies the documented fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackFormat {
    pub language: Option<String>,
    pub label: Option<String>,
    pub channel_count: u32,
    /// Sample rate in Hz, 0 if unknown
    pub sample_rate: u32,
    /// Bitrate in bits per second, 0 if unknown
    pub bitrate: u32,
    pub codec: Option<String>,
}

/// One group of tracks sharing a media type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackGroup {
    track_type: TrackType,
    formats: Vec<TrackFormat>,
}

impl TrackGroup {
    pub fn new(track_type: TrackType, formats: Vec<TrackFormat>) -> Self {
        Self {
            track_type,
            formats,
        }
    }

    pub fn track_type(&self) -> TrackType {
        self.track_type
    }

    pub fn formats(&self) -> &[TrackFormat] {
        &self.formats
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

/// Ordered snapshot of all track groups in a prepared resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackList {
    groups: Vec<TrackGroup>,
}

impl TrackList {
    pub fn new(groups: Vec<TrackGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[TrackGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&TrackGroup> {
        self.groups.get(index)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Convert the snapshot into audio track descriptors
    ///
    /// Iterates groups in reported order, and within each audio group the
    /// formats in index order, emitting one descriptor per format. Non-audio
    /// groups contribute nothing but keep their group index.
    ///
    /// Fallbacks:
    /// * language: `"und"` when absent
    /// * label: explicit label, else language tag, else `"Audio N"` where N
    ///   is the 1-based position among descriptors emitted so far
    /// * codec: `"unknown"` when absent
    pub fn audio_tracks(&self) -> Vec<AudioTrack> {
        let mut tracks: Vec<AudioTrack> = Vec::new();

        for (group_index, group) in self.groups.iter().enumerate() {
            if group.track_type() != TrackType::Audio {
                continue;
            }
            for (track_index, format) in group.formats().iter().enumerate() {
                let language = format
                    .language
                    .clone()
                    .unwrap_or_else(|| UNDETERMINED_LANGUAGE.to_string());
                let label = format
                    .label
                    .clone()
                    .or_else(|| format.language.clone())
                    .unwrap_or_else(|| format!("Audio {}", tracks.len() + 1));
                let codec = format
                    .codec
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_CODEC.to_string());

                tracks.push(AudioTrack {
                    group_index: group_index as u32,
                    track_index: track_index as u32,
                    language,
                    label,
                    channel_count: format.channel_count,
                    sample_rate: format.sample_rate,
                    bitrate: format.bitrate,
                    codec,
                });
            }
        }

        tracks
    }
}

/// Audio track descriptor delivered to the application shell
///
/// One per elementary audio track found in the resource, in stable
/// (group index, track index) order. Field defaults are already applied;
/// every field is concrete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTrack {
    /// Position of the owning group within the reported group list
    pub group_index: u32,
    /// Position of the track within its group
    pub track_index: u32,
    pub language: String,
    pub label: String,
    pub channel_count: u32,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bitrate in bits per second, 0 if unknown
    pub bitrate: u32,
    pub codec: String,
}
