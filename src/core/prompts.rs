//! Prompt contracts and few-shot sets.
//!
//! Each prompt asks for one JSON object with a single well-known field.
//! The few-shot pairs anchor the format and cover the filenames models
//! most often get wrong.

use crate::services::llm::Example;

pub const EPISODE_PROMPT: &str = r#"You extract the episode number from the path of a video file.
The path may contain release groups, resolutions, codecs, CRC hashes and nested folders.
Answer with a single JSON object of the form {"episode": <number>} and nothing else.
The episode number is a plain integer without leading zeros.
If the path does not contain an episode number, answer {"episode": null}."#;

pub const SERIES_PROMPT: &str = r#"You extract the full name of the TV series from the path of a video file.
Use the complete title as a human would write it, with spaces between words.
Do not include the year, the season or episode code, the release group, the resolution, the source or the codec.
Answer with a single JSON object of the form {"series": "<name>"} and nothing else.
If no series name can be found, answer {"series": null}."#;

pub const SEASON_PROMPT: &str = r#"You extract the season number from the path of a video file.
The season may appear as S02, "Season 2", "2nd Season", a roman numeral after the title, or in a parent folder.
If the path shows no season at all, the season is 1.
Answer with a single JSON object of the form {"season": <number>} and nothing else."#;

pub const CLASSIFY_PROMPT: &str = r#"You classify the path of a file from a media library.
Categories:
- "Episode": one episode of a TV series or anime.
- "Movie": a feature film, including a film that belongs to a series ("The Movie").
- "Unrelated": anything else: subtitles, images, text files, samples, system files, trailers, credits and extras such as NCOP, NCED, menus or previews.
Answer with a single JSON object of the form {"category": "<Episode|Movie|Unrelated>"} and nothing else."#;

pub const BATCH_PROMPT: &str = r#"You check whether a list of file paths from one folder already follows the naming scheme
"<Series Name> S<season, two digits>E<episode, two digits>" exactly, for example "Breaking Bad S01E05".
Rules:
- Judge the file name without its folder and without its extension.
- Season and episode must both have exactly two digits.
- Nothing may follow the episode code: no titles, resolutions or release groups.
- Every file in the list must follow the scheme, including stray files such as .DS_Store or output.txt.
- Episode numbers do not need to be contiguous.
Answer with a single JSON object of the form {"matches": true} or {"matches": false} and nothing else."#;

pub fn episode_examples() -> Vec<Example> {
    vec![
        Example::new(
            "Breaking.Bad.S01E05.Gray.Matter.1080p.BluRay.x264-ROVERS.mkv",
            r#"{"episode": 5}"#,
        ),
        Example::new(
            "[Judas] Vinland Saga (Season 2) [1080p][HEVC x265 10bit][Multi-Subs]/[Judas] Vinland Saga - S02E13.mkv",
            r#"{"episode": 13}"#,
        ),
        Example::new(
            "[VCB-Studio] Kimi no Na wa [Ma10p_1080p]/[VCB-Studio] Shingeki no Kyojin [07][Ma10p_1080p][x265_flac].mkv",
            r#"{"episode": 7}"#,
        ),
        Example::new(
            "Mob Psycho 100 II - 03 [BD 1080p][A1B2C3D4].mkv",
            r#"{"episode": 3}"#,
        ),
        Example::new("The Office (US) 2x11 Booze Cruise.avi", r#"{"episode": 11}"#),
        Example::new("Some Documentary Overview.mkv", r#"{"episode": null}"#),
    ]
}

pub fn series_examples() -> Vec<Example> {
    vec![
        Example::new(
            "Breaking.Bad.S01E05.Gray.Matter.1080p.BluRay.x264-ROVERS.mkv",
            r#"{"series": "Breaking Bad"}"#,
        ),
        Example::new(
            "Doctor.Who.2005.S03E08.Human.Nature.720p.WEB-DL.mkv",
            r#"{"series": "Doctor Who"}"#,
        ),
        Example::new(
            "[Judas] Vinland Saga (Season 2) [1080p][HEVC x265 10bit][Multi-Subs]/[Judas] Vinland Saga - S02E13.mkv",
            r#"{"series": "Vinland Saga"}"#,
        ),
        Example::new(
            "[SubsPlease] Kaguya-sama wa Kokurasetai - Ultra Romantic - 05 (1080p) [8A1B2C3D].mkv",
            r#"{"series": "Kaguya-sama wa Kokurasetai"}"#,
        ),
        Example::new("the.expanse.s02e01.mkv", r#"{"series": "The Expanse"}"#),
    ]
}

pub fn season_examples() -> Vec<Example> {
    vec![
        Example::new(
            "Breaking.Bad.S01E05.Gray.Matter.1080p.BluRay.x264-ROVERS.mkv",
            r#"{"season": 1}"#,
        ),
        Example::new(
            "[Judas] Vinland Saga (Season 2) [1080p]/[Judas] Vinland Saga - 13.mkv",
            r#"{"season": 2}"#,
        ),
        Example::new("Mob Psycho 100 II - 03 [BD 1080p].mkv", r#"{"season": 2}"#),
        Example::new(
            "Made in Abyss/Season 3/Made in Abyss - 01.mkv",
            r#"{"season": 3}"#,
        ),
        Example::new("[HorribleSubs] Mushishi - 04 [720p].mkv", r#"{"season": 1}"#),
    ]
}

pub fn classify_examples() -> Vec<Example> {
    vec![
        Example::new(
            "Breaking.Bad.S01E05.Gray.Matter.1080p.BluRay.x264-ROVERS.mkv",
            r#"{"category": "Episode"}"#,
        ),
        Example::new(
            "[VCB-Studio] Shingeki no Kyojin [Ma10p_1080p]/[VCB-Studio] Shingeki no Kyojin [07][Ma10p_1080p][x265_flac].mkv",
            r#"{"category": "Episode"}"#,
        ),
        Example::new(
            "[VCB-Studio] Shingeki no Kyojin [Ma10p_1080p]/SPs/[VCB-Studio] Shingeki no Kyojin [NCED01][Ma10p_1080p][x265_flac].mkv",
            r#"{"category": "Unrelated"}"#,
        ),
        Example::new(
            "[VCB-Studio] Shingeki no Kyojin [Ma10p_1080p]/CDs/[1308xx] Guren no Yumiya/01.flac",
            r#"{"category": "Unrelated"}"#,
        ),
        Example::new(
            "Made in Abyss/Made in Abyss - Dawn of the Deep Soul (The Movie) [1080p].mkv",
            r#"{"category": "Movie"}"#,
        ),
        Example::new(
            "Inception.2010.1080p.BluRay.x264.mkv",
            r#"{"category": "Movie"}"#,
        ),
        Example::new(
            "Breaking Bad/Season 01/Breaking Bad S01E05.en.srt",
            r#"{"category": "Unrelated"}"#,
        ),
        Example::new("Breaking Bad/.DS_Store", r#"{"category": "Unrelated"}"#),
        Example::new("Breaking Bad/poster.jpg", r#"{"category": "Unrelated"}"#),
    ]
}

pub fn batch_examples() -> Vec<Example> {
    vec![
        Example::new(
            r#"["Breaking Bad/Season 01/Breaking Bad S01E01.mkv", "Breaking Bad/Season 01/Breaking Bad S01E02.mkv"]"#,
            r#"{"matches": true}"#,
        ),
        Example::new(
            r#"["Show S01E01.mkv", "Show S01E02.mkv", "Show S01E05.mkv"]"#,
            r#"{"matches": true}"#,
        ),
        Example::new(
            r#"["Show S1E1.mkv", "Show S1E2.mkv"]"#,
            r#"{"matches": false}"#,
        ),
        Example::new(
            r#"["Show S01E01.mkv", "Show S01E02.mkv", ".DS_Store"]"#,
            r#"{"matches": false}"#,
        ),
        Example::new(
            r#"["Show S01E01.mkv", "Show S01E02.mkv", "output.txt"]"#,
            r#"{"matches": false}"#,
        ),
        Example::new(
            r#"["Show S01E01 - Pilot.mkv", "Show S01E02 - Second.mkv"]"#,
            r#"{"matches": false}"#,
        ),
        Example::new(
            r#"["Show.S01E01.1080p.WEB-DL.x264-GRP.mkv", "Show.S01E02.1080p.WEB-DL.x264-GRP.mkv"]"#,
            r#"{"matches": false}"#,
        ),
        Example::new(
            r#"["Show S01E01.mkv.mkv", "Show S01E02.mkv.mkv"]"#,
            r#"{"matches": false}"#,
        ),
    ]
}
