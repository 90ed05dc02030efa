//! Seed text offered to the coach when a category's status is picked.

use crate::category::Category;
use crate::score::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultContent {
    pub notes: &'static str,
    pub remedies: &'static str,
    pub crystals: &'static str,
}

impl DefaultContent {
    pub const EMPTY: DefaultContent = DefaultContent {
        notes: "",
        remedies: "",
        crystals: "",
    };

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.remedies.is_empty() && self.crystals.is_empty()
    }
}

struct CategoryDefaults {
    balanced: DefaultContent,
    slightly_weak: DefaultContent,
    blocked: DefaultContent,
    overactive: DefaultContent,
}

const fn content(notes: &'static str, remedies: &'static str, crystals: &'static str) -> DefaultContent {
    DefaultContent {
        notes,
        remedies,
        crystals,
    }
}

const ROOT: CategoryDefaults = CategoryDefaults {
    balanced: content(
        "Feels grounded, safe and present. Steady energy through the day.",
        "Keep daily walks outdoors and regular meal times.",
        "Red jasper or smoky quartz to maintain grounding.",
    ),
    slightly_weak: content(
        "Occasional restlessness, mild worry about money or home.",
        "Barefoot grounding for 10 minutes, root vegetables, slow exhale breathing.",
        "Hematite bracelet during the day. Visit: https://myaurabliss.com/collections/root-chakra",
    ),
    blocked: content(
        "Fear, anxiety, low energy, feeling unsupported or disconnected from the body. Lower back or leg tension.",
        "Daily grounding meditation, squats and walking, red foods, LAM mantra chanting for 5 minutes.",
        "Red jasper, black tourmaline and hematite placed at the base of the spine during rest. Visit: https://myaurabliss.com/collections/root-chakra-crystals-bracelets-and-healing-sets",
    ),
    overactive: content(
        "Rigidity, resistance to change, holding on to possessions or routines.",
        "Gentle stretching, yin yoga, practice letting go with journaling.",
        "Smoky quartz to soften and release. Visit: https://myaurabliss.com/collections/root-chakra",
    ),
};

const SACRAL: CategoryDefaults = CategoryDefaults {
    balanced: content(
        "Creative, emotionally fluid, enjoys pleasure without excess.",
        "Keep creative hobbies and hydration.",
        "Carnelian to keep creative flow.",
    ),
    slightly_weak: content(
        "Low creativity, mild emotional numbness.",
        "Hip-opening yoga, dance, warm baths.",
        "Carnelian tumble stone in pocket. Visit: https://myaurabliss.com/collections/sacral-chakra",
    ),
    blocked: content(
        "Guilt, emotional suppression, low libido, lack of joy or creativity. Lower abdomen discomfort.",
        "Hip circles, free dance, orange foods, VAM mantra, time near water.",
        "Carnelian, orange calcite and moonstone on the lower abdomen for 15 minutes. Visit: https://myaurabliss.com/collections/sacral-chakra-crystals-bracelets-and-healing-sets",
    ),
    overactive: content(
        "Emotional swings, over-attachment, indulgence.",
        "Grounding practices, mindful eating, boundaries in relationships.",
        "Moonstone to calm emotional waves. Visit: https://myaurabliss.com/collections/sacral-chakra",
    ),
};

const SOLAR_PLEXUS: CategoryDefaults = CategoryDefaults {
    balanced: content(
        "Confident, motivated, clear sense of purpose.",
        "Keep goal setting and core exercise.",
        "Citrine to sustain confidence.",
    ),
    slightly_weak: content(
        "Occasional self-doubt, procrastination.",
        "Sun exposure in the morning, core strengthening, small daily wins.",
        "Citrine point on the desk. Visit: https://myaurabliss.com/collections/solar-plexus-chakra",
    ),
    blocked: content(
        "Low self-esteem, indecision, digestive issues, feeling powerless or controlled by others.",
        "Breath of fire, core workouts, yellow foods, RAM mantra, affirmations of personal power.",
        "Citrine, tiger eye and yellow jasper over the navel during meditation. Visit: https://myaurabliss.com/collections/solar-plexus-chakra-crystals-bracelets-and-healing-sets",
    ),
    overactive: content(
        "Control issues, anger, perfectionism, burnout.",
        "Cooling breath, slow walks, practice delegating.",
        "Tiger eye with moonstone to balance drive. Visit: https://myaurabliss.com/collections/solar-plexus-chakra",
    ),
};

const HEART: CategoryDefaults = CategoryDefaults {
    balanced: content(
        "Loving, compassionate, open to giving and receiving.",
        "Keep gratitude practice and connection time.",
        "Rose quartz to keep the heart open.",
    ),
    slightly_weak: content(
        "Some guardedness, difficulty receiving care.",
        "Loving-kindness meditation, chest-opening stretches.",
        "Rose quartz bracelet. Visit: https://myaurabliss.com/collections/heart-chakra",
    ),
    blocked: content(
        "Grief, loneliness, resentment, difficulty trusting. Tight chest or shallow breathing.",
        "Heart-opening yoga, forgiveness journaling, green foods, YAM mantra, time in nature.",
        "Rose quartz, green aventurine and malachite over the heart during rest. Visit: https://myaurabliss.com/collections/heart-chakra-crystals-bracelets-and-healing-sets",
    ),
    overactive: content(
        "People pleasing, over-giving, poor boundaries.",
        "Boundary setting, self-care rituals, saying no with kindness.",
        "Green aventurine with rhodonite for balance. Visit: https://myaurabliss.com/collections/heart-chakra",
    ),
};

const THROAT: CategoryDefaults = CategoryDefaults {
    balanced: content(
        "Clear, honest communication and good listening.",
        "Keep journaling and singing.",
        "Blue lace agate to support expression.",
    ),
    slightly_weak: content(
        "Hesitation to speak up, occasional sore throat.",
        "Humming, neck stretches, warm herbal tea.",
        "Blue lace agate pendant. Visit: https://myaurabliss.com/collections/throat-chakra",
    ),
    blocked: content(
        "Fear of speaking, feeling unheard, throat or neck tension, difficulty expressing truth.",
        "Chanting HAM, singing, honest journaling, neck and shoulder release.",
        "Aquamarine, sodalite and blue lace agate at the throat during meditation. Visit: https://myaurabliss.com/collections/throat-chakra-crystals-bracelets-and-healing-sets",
    ),
    overactive: content(
        "Talking over others, gossip, harsh words.",
        "Silent practice periods, mindful listening exercises.",
        "Aquamarine to soften expression. Visit: https://myaurabliss.com/collections/throat-chakra",
    ),
};

const THIRD_EYE: CategoryDefaults = CategoryDefaults {
    balanced: content(
        "Intuitive, clear thinking, good imagination.",
        "Keep meditation and dream journaling.",
        "Amethyst to support intuition.",
    ),
    slightly_weak: content(
        "Foggy thinking, doubting intuition.",
        "Candle gazing, reduced screen time before sleep.",
        "Amethyst on the bedside table. Visit: https://myaurabliss.com/collections/third-eye-chakra",
    ),
    blocked: content(
        "Confusion, lack of direction, headaches, difficulty visualizing or trusting inner guidance.",
        "Trataka meditation, OM chanting, visualization practice, purple foods.",
        "Amethyst, lapis lazuli and fluorite on the forehead during meditation. Visit: https://myaurabliss.com/collections/third-eye-chakra-crystals-bracelets-and-healing-sets",
    ),
    overactive: content(
        "Overthinking, vivid dreams, difficulty staying grounded.",
        "Grounding walks, reduce stimulation, root chakra practices.",
        "Lapis lazuli with hematite for balance. Visit: https://myaurabliss.com/collections/third-eye-chakra",
    ),
};

const CROWN: CategoryDefaults = CategoryDefaults {
    balanced: content(
        "Sense of connection, peace and purpose.",
        "Keep silent meditation and gratitude.",
        "Clear quartz to keep clarity.",
    ),
    slightly_weak: content(
        "Feeling disconnected at times, low inspiration.",
        "Silent sitting, time in open sky or nature.",
        "Clear quartz point. Visit: https://myaurabliss.com/collections/crown-chakra",
    ),
    blocked: content(
        "Isolation, lack of meaning, spiritual disconnection, cynicism.",
        "Silent meditation, prayer or contemplation, fasting from media, violet light visualization.",
        "Clear quartz, amethyst and selenite above the head during rest. Visit: https://myaurabliss.com/collections/crown-chakra-crystals-bracelets-and-healing-sets",
    ),
    overactive: content(
        "Spacey, ungrounded, escaping into spiritual ideas.",
        "Grounding foods, physical exercise, daily routine.",
        "Selenite with smoky quartz to ground. Visit: https://myaurabliss.com/collections/crown-chakra",
    ),
};

fn table(category: Category) -> &'static CategoryDefaults {
    match category {
        Category::Root => &ROOT,
        Category::Sacral => &SACRAL,
        Category::SolarPlexus => &SOLAR_PLEXUS,
        Category::Heart => &HEART,
        Category::Throat => &THROAT,
        Category::ThirdEye => &THIRD_EYE,
        Category::Crown => &CROWN,
    }
}

/// Seed content for a category and status; unrecognized statuses get
/// [`DefaultContent::EMPTY`].
pub fn default_content(category: Category, status: &Status) -> DefaultContent {
    let defaults = table(category);
    match status {
        Status::Balanced => defaults.balanced,
        Status::SlightlyWeak => defaults.slightly_weak,
        Status::Blocked => defaults.blocked,
        Status::Overactive => defaults.overactive,
        Status::Unrecognized(_) => DefaultContent::EMPTY,
    }
}
