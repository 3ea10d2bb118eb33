//! Built-in batches. Each preset is a fixed list of work items plus the
//! aspect ratio its pictures are meant for.

use color_eyre::{Result, eyre::eyre};
use engine::{AspectRatio, WorkItem};
use indoc::indoc;
use nonempty::NonEmpty;
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, Display, clap::ValueEnum, EnumIter, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum Preset {
    /// Wide hero pictures for the landing page
    Hero,
    /// Close-ups for the individual project pages
    ProjectDetails,
    /// Regenerates the single Brooklyn producer picture
    Brooklyn,
}

pub struct Batch {
    pub items: NonEmpty<WorkItem>,
    pub aspect: AspectRatio,
}

/// (filename, prompt)
type Entry = (&'static str, &'static str);

const HERO: &[Entry] = &[
    (
        "kenya-motif-afrobeats.png",
        indoc! {"
            Photorealistic image of a young Kenyan music producer in a modest home studio in Nairobi.
            MIDI keyboard, audio interface, studio monitors and a laptop running a DAW.
            Natural window light, the city skyline outside, colorful textiles on the walls.
            Editorial music magazine style, natural colors, 8K quality.
        "},
    ),
    (
        "usa-brooklyn-hiphop-producer.png",
        indoc! {"
            Photorealistic image of a hip-hop producer at a large mixing console in a Brooklyn studio.
            MPC drum machine, vintage synthesizers, vocal booth in the background.
            Exposed brick, industrial lighting mixed with LED strips, producer in streetwear.
            Cinematic lighting, editorial studio photography, 8K quality.
        "},
    ),
    (
        "brazil-mc-favela-funk.png",
        indoc! {"
            Photorealistic image of a young funk carioca MC holding a microphone in a Rio de Janeiro favela.
            Colorful houses cascading down the hillside behind, golden hour light.
            Bright streetwear and gold jewelry, energetic atmosphere.
            Documentary street photography, 8K quality.
        "},
    ),
    (
        "hero-artist-working-1.png",
        indoc! {"
            Photorealistic wide shot of a music artist wearing headphones in a modern recording studio.
            Warm cinematic light, shallow depth of field, focused creative energy.
            Magazine cover photography style, 8K quality.
        "},
    ),
    (
        "hero-artist-working-2.png",
        indoc! {"
            Photorealistic image of a singer-songwriter in a cozy home studio with an acoustic guitar.
            Microphone, laptop with recording software, plants and warm window light.
            Indie musician aesthetic, natural colors, 8K quality.
        "},
    ),
    (
        "hero-global-artists-collage.png",
        indoc! {"
            Photorealistic split composition of musicians from different countries at work.
            A producer with a laptop, a singer at a microphone, a player mixing traditional instruments with modern gear.
            Candid moments, natural light, photojournalism aesthetic, 8K quality.
        "},
    ),
];

const PROJECT_DETAILS: &[Entry] = &[
    (
        "kenya-motif-detail-1.png",
        indoc! {"
            Photorealistic close-up of home studio gear in a Nairobi apartment.
            MIDI keyboard, audio interface with glowing level meters, monitors on foam pads.
            Afternoon window light, documentary style, 8K quality.
        "},
    ),
    (
        "kenya-motif-detail-2.png",
        indoc! {"
            Photorealistic image of a streaming analytics dashboard on a laptop screen.
            A producer's hands on the keyboard, charts of monthly streams and earnings.
            Home office in Nairobi, natural light, editorial quality.
        "},
    ),
    (
        "brooklyn-detail-1.png",
        indoc! {"
            Photorealistic close-up of a producer's hands playing the pads of an MPC drum machine.
            Exposed brick studio in the background, natural studio light.
            Editorial studio photography, 8K quality.
        "},
    ),
    (
        "brooklyn-detail-2.png",
        indoc! {"
            Photorealistic view through the glass into a vocal booth.
            Microphone on a shock mount, acoustic foam, producer at the console outside.
            Industrial Brooklyn lighting, documentary style, 8K quality.
        "},
    ),
    (
        "brazil-detail-1.png",
        indoc! {"
            Photorealistic image of hands holding a smartphone showing viral video statistics.
            Colorful favela buildings through the window behind, golden hour light.
            Documentary photography, 8K quality.
        "},
    ),
    (
        "brazil-detail-2.png",
        indoc! {"
            Photorealistic image of a makeshift recording setup in a Rio favela.
            Microphone on a stand, laptop with music software, an artist recording vocals.
            Community visible through the window, natural light, photojournalism quality.
        "},
    ),
];

const BROOKLYN: &[Entry] = &[(
    "usa-brooklyn-hiphop-producer.png",
    indoc! {"
        Photorealistic image of a hip-hop producer working at a high-end mixing console in a Brooklyn home studio.
        Multiple studio monitors, MPC drum machine, vintage synthesizers, vocal booth in the background.
        Casual streetwear, exposed brick walls, window light mixed with LED strips.
        Cinematic lighting, editorial photography, 8K quality.
    "},
)];

impl Preset {
    pub fn aspect(&self) -> AspectRatio {
        match self {
            Preset::Hero | Preset::Brooklyn => AspectRatio::Wide,
            Preset::ProjectDetails => AspectRatio::Standard,
        }
    }

    fn entries(&self) -> &'static [Entry] {
        match self {
            Preset::Hero => HERO,
            Preset::ProjectDetails => PROJECT_DETAILS,
            Preset::Brooklyn => BROOKLYN,
        }
    }

    pub fn batch(&self) -> Result<Batch> {
        let items = self
            .entries()
            .iter()
            .map(|(filename, prompt)| WorkItem::new(*prompt, *filename))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Batch {
            items: NonEmpty::from_vec(items).ok_or(eyre!("Preset {self} has no items"))?,
            aspect: self.aspect(),
        })
    }
}
