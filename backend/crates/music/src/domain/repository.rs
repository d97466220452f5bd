//! Repository Traits

use kernel::id::{AlbumId, UserId};

use crate::domain::album::{Album, NewAlbum};
use crate::domain::track::{NewTrack, Track};
use crate::error::MusicResult;

#[trait_variant::make(MusicRepository: Send)]
pub trait LocalMusicRepository {
    async fn insert_album(&self, album: NewAlbum) -> MusicResult<Album>;

    /// Owner of an album, if it exists
    async fn album_owner(&self, album_id: &AlbumId) -> MusicResult<Option<UserId>>;

    async fn insert_track(&self, track: NewTrack) -> MusicResult<Track>;
}
