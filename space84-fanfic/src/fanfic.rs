//! Fanfic synthesis
//!
//! Picks one of three fixed story templates at random and fills it with the
//! artist's metadata. Missing images and videos are replaced by placeholder
//! links; the links are never fetched or checked.

use rand::Rng;
use serde::Serialize;
use space84_common::{ArtistRecord, VideoLink, YoutubeVideo};

const FALLBACK_GENRE: &str = "rock";
const FALLBACK_TRACK: &str = "Unknown Track";
const FALLBACK_LISTENERS: &str = "711";
const MAX_SIMILAR_ARTISTS: usize = 3;
const MAX_SYNTHESIZED_VIDEOS: usize = 3;

const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";
const PLACEHOLDER_IMAGE_URL: &str = "https://source.unsplash.com/800x600/";

/// The three story templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanficTemplate {
    /// A collector finds a forgotten LP
    LostAlbum,
    /// A street performance by the Han River goes viral
    RiversideMelody,
    /// Rumors about who the artist really is
    MysteryArtist,
}

impl FanficTemplate {
    pub const ALL: [FanficTemplate; 3] = [
        FanficTemplate::LostAlbum,
        FanficTemplate::RiversideMelody,
        FanficTemplate::MysteryArtist,
    ];

    /// Uniform random choice among [`FanficTemplate::ALL`]
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn title(self, artist_name: &str) -> String {
        match self {
            FanficTemplate::LostAlbum => format!("{}의 잃어버린 앨범", artist_name),
            FanficTemplate::RiversideMelody => {
                format!("한강변에서 울려 퍼진 {}의 멜로디", artist_name)
            }
            FanficTemplate::MysteryArtist => {
                format!("미스터리한 아티스트: {}의 정체", artist_name)
            }
        }
    }

    fn story(self, record: &ArtistRecord) -> String {
        let name = record.artist_name.as_str();
        let genre = record
            .genres
            .first()
            .map(String::as_str)
            .unwrap_or(FALLBACK_GENRE);
        let count = record.tracks_count();
        let first_similar = record.similar_artists.first().map(String::as_str);

        match self {
            FanficTemplate::LostAlbum => {
                let first_track = record.tracks.first().map(String::as_str).unwrap_or(FALLBACK_TRACK);
                let compared_to = first_similar.unwrap_or("legendary musicians");
                format!(
                    "어느 날, 한 음악 수집가가 중고 레코드 가게에서 먼지 덮인 LP를 발견했다.\n\
                     커버에는 '{name}'이라는 이름이 희미하게 적혀 있었다.\n\
                     \n\
                     이 앨범은 {genre} 장르의 잃어버린 걸작으로,\n\
                     {count}개의 트랙이 담겨 있었다. 특히 '{first_track}'은\n\
                     청취자를 다른 세계로 데려가는 듯한 마법을 품고 있었다.\n\
                     \n\
                     많은 사람들이 이 아티스트를 {compared_to}와\n\
                     비교하곤 했지만, {name}만의 독특한 색깔은 결코 복제될 수 없었다.\n\
                     \n\
                     지금도 어딘가에서 이 레코드의 복사본을 찾는 팬들이 있다고 한다..."
                )
            }
            FanficTemplate::RiversideMelody => {
                let last_track = record.tracks.last().map(String::as_str).unwrap_or(FALLBACK_TRACK);
                format!(
                    "서울의 한강변, 밤 11시.\n\
                     \n\
                     누군가 작은 앰프를 들고 나타나 '{last_track}'을 연주하기 시작했다.\n\
                     {name}의 음악은 강물처럼 흘러갔고, 지나가던 사람들의 발걸음을 멈추게 했다.\n\
                     \n\
                     {genre}의 리듬이 서울의 밤하늘에 녹아들었다.\n\
                     누군가는 이 순간을 영상으로 남겼고, 그 영상은 곧 바이럴되었다.\n\
                     \n\
                     \"이게 진짜 음악이지,\" 한 댓글이 달렸다.\n\
                     \"{name}, 당신의 음악은 시대를 초월합니다.\"\n\
                     \n\
                     하지만 연주자는 이미 사라지고 없었다.\n\
                     강변에는 오직 여운만이 남아 물결에 실려 흘러갔다..."
                )
            }
            FanficTemplate::MysteryArtist => {
                let listeners = record
                    .listener_count
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| FALLBACK_LISTENERS.to_string());
                let rumored = first_similar.unwrap_or("a famous musician");
                let country = record.country.as_str();
                let track_list = record
                    .tracks
                    .iter()
                    .map(|track| format!("- {}", track))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "{name}은 음악계의 미스터리다.\n\
                     \n\
                     겨우 {listeners}명의 청취자만이 이 아티스트를 알고 있지만,\n\
                     그들은 자신들이 특별한 비밀을 공유하고 있다고 믿는다.\n\
                     \n\
                     일각에서는 {name}이 사실 {rumored}의\n\
                     비밀 프로젝트라고 추측한다. {country} 출신으로 알려져 있지만, 확실하지 않다.\n\
                     \n\
                     {count}개의 트랙만이 인터넷에 떠돌아다닌다:\n\
                     {track_list}\n\
                     \n\
                     이 곡들은 마치 퍼즐 조각처럼, 더 큰 그림의 일부분인 것 같다.\n\
                     언젠가 {name}의 전체 이야기가 밝혀질 날이 올까?\n\
                     \n\
                     그때까지, 우리는 계속 듣고 또 들을 것이다..."
                )
            }
        }
    }
}

/// Metadata echoed with every story
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FanficMetadata {
    pub country: String,
    pub genres: Vec<String>,
    pub tracks_count: usize,
    pub tracks: Vec<String>,
    pub similar_artists: Vec<String>,
}

/// Response of the fanfic endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FanficResult {
    pub artist_name: String,
    pub title: String,
    pub story: String,
    pub metadata: FanficMetadata,
    pub youtube_videos: Vec<VideoLink>,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
}

/// Synthesize a fanfic with a process-wide random template choice
pub fn synthesize(record: &ArtistRecord) -> FanficResult {
    synthesize_with_rng(record, &mut rand::thread_rng())
}

/// Synthesize a fanfic choosing the template from `rng`
pub fn synthesize_with_rng<R: Rng + ?Sized>(record: &ArtistRecord, rng: &mut R) -> FanficResult {
    render(record, FanficTemplate::pick(rng))
}

/// Render a specific template
pub fn render(record: &ArtistRecord, template: FanficTemplate) -> FanficResult {
    let images = if record.images.is_empty() {
        placeholder_images(&record.artist_name)
    } else {
        record.images.clone()
    };

    let youtube_videos = if record.youtube_videos.is_empty() {
        search_videos(&record.artist_name, &record.tracks)
    } else {
        record.youtube_videos.clone()
    };

    FanficResult {
        artist_name: record.artist_name.clone(),
        title: template.title(&record.artist_name),
        story: template.story(record),
        metadata: FanficMetadata {
            country: record.country.clone(),
            genres: record.genres.clone(),
            tracks_count: record.tracks_count(),
            tracks: record.tracks.clone(),
            similar_artists: record
                .similar_artists
                .iter()
                .take(MAX_SIMILAR_ARTISTS)
                .cloned()
                .collect(),
        },
        youtube_videos,
        images,
        spotify_url: record.spotify_url.clone(),
    }
}

/// Three stock-photo search URLs keyed on the artist name
pub fn placeholder_images(artist_name: &str) -> Vec<String> {
    vec![
        format!(
            "{}?music,concert,{}",
            PLACEHOLDER_IMAGE_URL,
            artist_name.replace(' ', ",")
        ),
        format!("{}?musician,band,performance", PLACEHOLDER_IMAGE_URL),
        format!("{}?music,festival,stage", PLACEHOLDER_IMAGE_URL),
    ]
}

/// Search-results links for the first three tracks
pub fn search_videos(artist_name: &str, tracks: &[String]) -> Vec<VideoLink> {
    tracks
        .iter()
        .take(MAX_SYNTHESIZED_VIDEOS)
        .map(|track| {
            let query = urlencoding::encode(&format!("{} {}", artist_name, track)).into_owned();
            VideoLink::Search(YoutubeVideo {
                title: track.clone(),
                url: format!("{}{}", YOUTUBE_SEARCH_URL, query),
                search_query: query,
            })
        })
        .collect()
}
