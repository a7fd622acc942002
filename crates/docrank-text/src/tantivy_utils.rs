use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, StopWordFilter, TextAnalyzer, TokenStream};

use docrank_core::config::{RankingSettings, StopWordPreset};

/// Common English function words, lowercase. Same list scikit-learn ships as `"english"`.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
	"a","about","above","across","after","afterwards","again","against","all","almost","alone","along","already","also","although","always","am","among","amongst","amoungst","amount","an","and","another","any","anyhow","anyone","anything","anyway","anywhere","are","around","as","at",
	"back","be","became","because","become","becomes","becoming","been","before","beforehand","behind","being","below","beside","besides","between","beyond","bill","both","bottom","but","by",
	"call","can","cannot","cant","co","con","could","couldnt","cry",
	"de","describe","detail","do","done","down","due","during",
	"each","eg","eight","either","eleven","else","elsewhere","empty","enough","etc","even","ever","every","everyone","everything","everywhere","except",
	"few","fifteen","fifty","fill","find","fire","first","five","for","former","formerly","forty","found","four","from","front","full","further",
	"get","give","go",
	"had","has","hasnt","have","he","hence","her","here","hereafter","hereby","herein","hereupon","hers","herself","him","himself","his","how","however","hundred",
	"i","ie","if","in","inc","indeed","interest","into","is","it","its","itself",
	"keep",
	"last","latter","latterly","least","less","ltd",
	"made","many","may","me","meanwhile","might","mill","mine","more","moreover","most","mostly","move","much","must","my","myself",
	"name","namely","neither","never","nevertheless","next","nine","no","nobody","none","noone","nor","not","nothing","now","nowhere",
	"of","off","often","on","once","one","only","onto","or","other","others","otherwise","our","ours","ourselves","out","over","own",
	"part","per","perhaps","please","put",
	"rather","re",
	"same","see","seem","seemed","seeming","seems","serious","several","she","should","show","side","since","sincere","six","sixty","so","some","somehow","someone","something","sometime","sometimes","somewhere","still","such","system",
	"take","ten","than","that","the","their","them","themselves","then","thence","there","thereafter","thereby","therefore","therein","thereupon","these","they","thick","thin","third","this","those","though","three","through","throughout","thru","thus","to","together","too","top","toward","towards","twelve","twenty","two",
	"un","under","until","up","upon","us",
	"very","via",
	"was","we","well","were","what","whatever","when","whence","whenever","where","whereafter","whereas","whereby","wherein","whereupon","wherever","whether","which","while","whither","who","whoever","whole","whom","whose","why","will","with","within","without","would",
	"yet","you","your","yours","yourself","yourselves",
];

/// Tokenizer shared by every document of a batch: split on non-alphanumerics,
/// lowercase, drop stop words and tokens shorter than `min_chars`.
pub struct TermAnalyzer {
	analyzer: TextAnalyzer,
	min_chars: usize,
}

impl TermAnalyzer {
	pub fn new<I, S>(stop_words: I, min_chars: usize) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
			.filter(LowerCaser)
			.filter(StopWordFilter::remove(stop_words.into_iter().map(Into::into)))
			.build();
		Self { analyzer, min_chars }
	}

	pub fn from_settings(settings: &RankingSettings) -> Self {
		let preset: &[&str] = match settings.stop_words {
			StopWordPreset::English => ENGLISH_STOP_WORDS,
			StopWordPreset::None => &[],
		};
		let words = preset
			.iter()
			.map(|w| (*w).to_string())
			.chain(settings.extra_stop_words.iter().map(|w| w.to_lowercase()));
		Self::new(words, settings.min_token_chars)
	}

	/// Terms of `text` in reading order, duplicates kept.
	pub fn terms(&mut self, text: &str) -> Vec<String> {
		let min_chars = self.min_chars;
		let mut out = Vec::new();
		let mut stream = self.analyzer.token_stream(text);
		while stream.advance() {
			let term = &stream.token().text;
			if term.chars().count() >= min_chars {
				out.push(term.clone());
			}
		}
		out
	}
}

impl Default for TermAnalyzer {
	fn default() -> Self {
		Self::from_settings(&RankingSettings::default())
	}
}
