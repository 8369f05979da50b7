//! Hand-authored word to emoji mappings that win over every automated stage.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{info, warn};

use crate::error::LoadError;
use crate::normalize::normalize;
use crate::store::read_json;
use crate::types::{Emoji, InvalidEmoji};

/// Curated French mappings for everyday classroom vocabulary.
///
/// Keep this table disjoint from the stop-word list.
const CURATED: &[(&str, &str)] = &[
    // School and home
    ("maison", "🏠"), ("école", "🏫"), ("livre", "📖"), ("lire", "📖"), ("écrire", "✍️"),
    ("crayon", "✏️"), ("stylo", "🖊️"), ("règle", "📏"), ("ciseaux", "✂️"), ("papier", "📄"),
    ("lettre", "✉️"), ("enveloppe", "✉️"), ("calendrier", "📆"), ("horloge", "🕰️"),
    ("réveil", "⏰"), ("cloche", "🔔"), ("clé", "🔑"), ("porte", "🚪"), ("fenêtre", "🪟"),
    ("lit", "🛏️"), ("chaise", "🪑"), ("table", "🪑"), ("lampe", "💡"), ("miroir", "🪞"),
    ("savon", "🧼"), ("brosse", "🪥"), ("bougie", "🕯️"), ("boîte", "📦"), ("balai", "🧹"),
    ("poubelle", "🗑️"), ("cuisine", "🍳"), ("salon", "🛋️"), ("canapé", "🛋️"),
    ("douche", "🚿"), ("bain", "🛁"), ("escalier", "🪜"), ("mur", "🧱"),
    // People and family
    ("ami", "🤝"), ("copain", "🤝"), ("papa", "👨"), ("maman", "👩"), ("famille", "👨‍👩‍👧‍👦"),
    ("garçon", "👦"), ("fille", "👧"), ("homme", "👨"), ("femme", "👩"), ("bébé", "👶"),
    ("enfant", "🧒"), ("père", "👨"), ("mère", "👩"), ("frère", "👦"), ("soeur", "👧"),
    ("sœur", "👧"), ("grand-père", "👴"), ("grand-mère", "👵"), ("gens", "👥"),
    ("docteur", "👨‍⚕️"), ("médecin", "👨‍⚕️"), ("police", "👮"), ("pompier", "🧑‍🚒"),
    ("professeur", "👨‍🏫"), ("élève", "🧑‍🎓"), ("roi", "👑"), ("reine", "👸"),
    ("prince", "🤴"), ("princesse", "👸"),
    // Play and activities
    ("jouer", "🎮"), ("jeu", "🎲"), ("musique", "🎵"), ("chanson", "🎶"), ("danse", "💃"),
    ("danser", "💃"), ("football", "⚽"), ("tennis", "🎾"), ("natation", "🏊"),
    ("nager", "🏊"), ("courir", "🏃"), ("marcher", "🚶"), ("dormir", "😴"),
    ("sommeil", "💤"), ("rêve", "💭"), ("rêver", "💭"), ("cadeau", "🎁"), ("fête", "🎉"),
    ("anniversaire", "🎂"), ("noël", "🎄"), ("guitare", "🎸"), ("piano", "🎹"),
    ("tambour", "🥁"), ("film", "🎬"), ("cirque", "🎪"), ("vacances", "🏖️"),
    ("voyage", "✈️"), ("carte", "🗺️"), ("victoire", "🏆"), ("médaille", "🥇"),
    // Food and drink
    ("manger", "🍽️"), ("repas", "🍽️"), ("eau", "💧"), ("pomme", "🍎"), ("banane", "🍌"),
    ("pain", "🥖"), ("lait", "🥛"), ("café", "☕"), ("thé", "🍵"), ("jus", "🧃"),
    ("oeuf", "🥚"), ("œuf", "🥚"), ("fromage", "🧀"), ("beurre", "🧈"), ("viande", "🥩"),
    ("poulet", "🍗"), ("riz", "🍚"), ("frite", "🍟"), ("pizza", "🍕"), ("sandwich", "🥪"),
    ("sucre", "🍬"), ("sel", "🧂"), ("miel", "🍯"), ("chocolat", "🍫"), ("gâteau", "🎂"),
    ("glace", "🍦"), ("bonbon", "🍬"), ("fruit", "🍎"), ("orange", "🍊"), ("citron", "🍋"),
    ("fraise", "🍓"), ("cerise", "🍒"), ("raisin", "🍇"), ("légume", "🥦"),
    ("carotte", "🥕"), ("tomate", "🍅"), ("salade", "🥗"), ("champignon", "🍄"),
    // Clothes
    ("vêtement", "👕"), ("pantalon", "👖"), ("chemise", "👔"), ("robe", "👗"),
    ("manteau", "🧥"), ("chaussure", "👟"), ("chaussette", "🧦"), ("chapeau", "🎩"),
    ("casquette", "🧢"), ("gant", "🧤"), ("écharpe", "🧣"), ("lunettes", "👓"),
    ("montre", "⌚"), ("sac", "👜"), ("valise", "🧳"), ("parapluie", "☂️"), ("bague", "💍"),
    // Animals
    ("animal", "🐾"), ("chien", "🐶"), ("chat", "🐱"), ("oiseau", "🐦"), ("poisson", "🐟"),
    ("cheval", "🐴"), ("vache", "🐄"), ("cochon", "🐷"), ("mouton", "🐑"), ("chèvre", "🐐"),
    ("poule", "🐔"), ("canard", "🦆"), ("lapin", "🐰"), ("souris", "🐭"), ("lion", "🦁"),
    ("tigre", "🐯"), ("ours", "🐻"), ("loup", "🐺"), ("renard", "🦊"), ("éléphant", "🐘"),
    ("girafe", "🦒"), ("singe", "🐵"), ("serpent", "🐍"), ("grenouille", "🐸"),
    ("papillon", "🦋"), ("abeille", "🐝"), ("fourmi", "🐜"), ("araignée", "🕷️"),
    ("escargot", "🐌"), ("tortue", "🐢"), ("crocodile", "🐊"), ("baleine", "🐋"),
    ("dauphin", "🐬"), ("requin", "🦈"), ("dragon", "🐉"),
    // Transport
    ("voiture", "🚗"), ("vélo", "🚲"), ("bus", "🚌"), ("train", "🚂"), ("avion", "✈️"),
    ("bateau", "⛵"), ("fusée", "🚀"),
    // Nature and weather
    ("feu", "🔥"), ("soleil", "☀️"), ("lune", "🌙"), ("étoile", "⭐"), ("ciel", "☁️"),
    ("nuage", "☁️"), ("arbre", "🌳"), ("fleur", "🌸"), ("forêt", "🌲"), ("jardin", "🌻"),
    ("pluie", "🌧️"), ("neige", "❄️"), ("vent", "💨"), ("tonnerre", "⚡"), ("éclair", "⚡"),
    ("arc-en-ciel", "🌈"), ("montagne", "⛰️"), ("mer", "🌊"), ("océan", "🌊"),
    ("plage", "🏖️"), ("île", "🏝️"), ("volcan", "🌋"), ("désert", "🏜️"), ("terre", "🌍"),
    ("monde", "🌎"), ("planète", "🪐"), ("printemps", "🌸"), ("été", "☀️"),
    ("automne", "🍂"), ("hiver", "❄️"),
    // Time
    ("heure", "🕐"), ("temps", "⏳"), ("jour", "📅"), ("nuit", "🌃"),
    // Places
    ("château", "🏰"), ("hôpital", "🏥"), ("pharmacie", "💊"), ("banque", "🏦"),
    ("magasin", "🏪"), ("boulangerie", "🥐"), ("restaurant", "🍴"), ("hôtel", "🏨"),
    ("ferme", "🏡"), ("usine", "🏭"), ("bureau", "🏢"), ("église", "⛪"), ("stade", "🏟️"),
    ("gare", "🚉"), ("port", "⚓"), ("pont", "🌉"),
    // Body
    ("coeur", "❤️"), ("cœur", "❤️"), ("dent", "🦷"), ("oeil", "👁️"), ("œil", "👁️"),
    ("nez", "👃"), ("bouche", "👄"), ("oreille", "👂"), ("main", "✋"), ("pied", "🦶"),
    ("doigt", "👆"), ("bras", "💪"), ("jambe", "🦵"), ("cheveu", "💇"), ("os", "🦴"),
    // Feelings and qualities
    ("amour", "💕"), ("triste", "😢"), ("content", "😊"), ("heureux", "😃"),
    ("colère", "😠"), ("peur", "😨"), ("surprise", "😮"), ("fatigué", "😫"),
    ("malade", "🤒"), ("chaud", "🔥"), ("froid", "❄️"), ("rouge", "🔴"), ("bleu", "🔵"),
    ("vert", "🟢"), ("jaune", "🟡"), ("noir", "⚫"), ("blanc", "⚪"),
    // Objects and ideas
    ("oui", "✅"), ("non", "❌"), ("question", "❓"), ("idée", "💡"), ("argent", "💰"),
    ("travail", "💼"), ("sport", "🏅"), ("téléphone", "📱"), ("ordinateur", "💻"),
    ("télévision", "📺"), ("photo", "📸"), ("robot", "🤖"),
];

/// Word to emoji table consulted before any automated stage.
///
/// Keys are normalized on insertion.
///
/// # Example
///
/// ```
/// use lexmoji::ManualOverrides;
///
/// let overrides = ManualOverrides::from_pairs([("Chat", "🐱")]).unwrap();
/// assert_eq!(overrides.get("chat").unwrap().as_str(), "🐱");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualOverrides {
    entries: BTreeMap<String, Emoji>,
}

impl ManualOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in curated French table.
    pub fn curated() -> Self {
        let mut overrides = Self::new();
        let rejected = overrides.merge(CURATED.iter().copied());
        for (word, err) in rejected {
            warn!(word = %word, error = %err, "skipping curated override");
        }
        overrides
    }

    /// Builds a table from pairs, failing on the first invalid glyph.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, InvalidEmoji>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut overrides = Self::new();
        for (word, glyph) in pairs {
            overrides.insert(word.as_ref(), Emoji::new(glyph.as_ref())?);
        }
        Ok(overrides)
    }

    /// Inserts or replaces a mapping.
    pub fn insert(&mut self, word: &str, emoji: Emoji) {
        self.entries.insert(normalize(word), emoji);
    }

    /// Merges pairs over the current table, later pairs winning.
    ///
    /// Pairs whose glyph is invalid are returned instead of inserted.
    pub fn merge<I, K, V>(&mut self, pairs: I) -> Vec<(String, InvalidEmoji)>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut rejected = Vec::new();
        for (word, glyph) in pairs {
            match Emoji::new(glyph.as_ref()) {
                Ok(emoji) => self.insert(word.as_ref(), emoji),
                Err(err) => rejected.push((word.as_ref().to_string(), err)),
            }
        }
        rejected
    }

    /// Merges a flat JSON object `word -> glyph` over the current table.
    ///
    /// Invalid glyphs are skipped with a warning. Returns the number of
    /// mappings merged.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize, LoadError> {
        let document: BTreeMap<String, String> = read_json(path)?;
        let total = document.len();
        let rejected = self.merge(document);
        for (word, err) in &rejected {
            warn!(path = %path.display(), word = %word, error = %err, "skipping override");
        }
        let merged = total - rejected.len();
        info!(path = %path.display(), merged, "loaded overrides");
        Ok(merged)
    }

    /// Override for an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&Emoji> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Emoji)> {
        self.entries.iter().map(|(word, emoji)| (word.as_str(), emoji))
    }
}
