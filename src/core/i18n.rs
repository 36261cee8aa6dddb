//! Localized display strings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Pt,
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "pt" => Ok(Language::Pt),
            _ => Err(anyhow::anyhow!("Unsupported language: {}", s)),
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Pt => write!(f, "pt"),
        }
    }
}

const EN: &[(&str, &str)] = &[
    ("currencyConverter", "Currency Converter"),
    ("measurementConverter", "Measurement Converter"),
    ("financialConverter", "Financial Calculator"),
    ("healthConverter", "Health Calculator"),
    ("amount", "Amount"),
    ("from", "From"),
    ("to", "To"),
    ("result", "Result"),
    ("equals", "equals"),
    ("invalidAmount", "Invalid amount"),
    ("invalidAmountDesc", "Please enter a positive number to convert."),
    ("invalidInput", "Invalid input"),
    ("invalidInputDesc", "Please check the values and try again."),
    ("conversionFailed", "Conversion failed"),
    (
        "conversionFailedDesc",
        "Could not fetch exchange rates. Please try again later.",
    ),
    ("unsupportedCurrency", "Unsupported currency: {code}"),
    ("fetchingRates", "Fetching exchange rates..."),
    ("currencyCode", "Code"),
    ("currencyName", "Currency"),
    ("unit", "Unit"),
    ("value", "Value"),
    ("length", "Length"),
    ("weight", "Weight"),
    ("temperature", "Temperature"),
    ("area", "Area"),
    ("volume", "Volume"),
    ("speed", "Speed"),
    ("kilometers", "Kilometers"),
    ("miles", "Miles"),
    ("kilograms", "Kilograms"),
    ("pounds", "Pounds"),
    ("celsius", "Celsius"),
    ("fahrenheit", "Fahrenheit"),
    ("kelvin", "Kelvin"),
    ("squareMeters", "Square meters"),
    ("squareFeet", "Square feet"),
    ("liters", "Liters"),
    ("gallons", "Gallons"),
    ("kmh", "Kilometers per hour"),
    ("mph", "Miles per hour"),
    ("interestCalculator", "Interest Calculator"),
    ("simpleInterest", "Simple interest"),
    ("compoundInterest", "Compound interest"),
    ("principalAmount", "Principal amount"),
    ("annualInterestRate", "Annual interest rate (%)"),
    ("timeYears", "Time (years)"),
    ("compoundsPerYear", "Compounds per year"),
    ("totalInterest", "Total interest"),
    ("totalValue", "Total value"),
    ("loanCalculator", "Loan Calculator"),
    ("loanAmount", "Loan amount"),
    ("loanTermYears", "Loan term (years)"),
    ("monthlyPayment", "Monthly payment"),
    ("totalPayment", "Total payment"),
    ("tipCalculator", "Tip Calculator"),
    ("billAmount", "Bill amount"),
    ("tipPercentage", "Tip (%)"),
    ("numberOfPeople", "Number of people"),
    ("tipAmount", "Tip amount"),
    ("totalBill", "Total bill"),
    ("totalPerPerson", "Total per person"),
    ("bmiCalculator", "BMI Calculator"),
    ("calorieCalculator", "Calorie Calculator"),
    ("height", "Height (cm)"),
    ("weightKg", "Weight (kg)"),
    ("age", "Age"),
    ("gender", "Gender"),
    ("male", "Male"),
    ("female", "Female"),
    ("yourBmi", "Your BMI"),
    ("bmiCategory", "Category"),
    ("bmiRange", "BMI range"),
    ("underweight", "Underweight"),
    ("normalWeight", "Normal weight"),
    ("overweight", "Overweight"),
    ("obese", "Obese"),
    ("bmiRangeUnderweight", "Below 18.5"),
    ("bmiRangeNormal", "18.5 - 24.9"),
    ("bmiRangeOverweight", "25.0 - 29.9"),
    ("bmiRangeObese", "30.0 and above"),
    ("estDailyCalories", "Estimated daily calories"),
    ("sedentaryLifestyle", "Based on a sedentary lifestyle"),
    ("advertisement", "Advertisement"),
    ("adPlaceholder", "Your ad here"),
    ("shellWelcome", "Interactive mode ({lang}). Type a command, 'help' or 'exit'."),
];

const PT: &[(&str, &str)] = &[
    ("currencyConverter", "Conversor de Moedas"),
    ("measurementConverter", "Conversor de Medidas"),
    ("financialConverter", "Calculadora Financeira"),
    ("healthConverter", "Calculadora de Saúde"),
    ("amount", "Valor"),
    ("from", "De"),
    ("to", "Para"),
    ("result", "Resultado"),
    ("equals", "equivale a"),
    ("invalidAmount", "Valor inválido"),
    ("invalidAmountDesc", "Por favor, insira um número positivo para converter."),
    ("invalidInput", "Entrada inválida"),
    ("invalidInputDesc", "Verifique os valores e tente novamente."),
    ("conversionFailed", "Falha na conversão"),
    (
        "conversionFailedDesc",
        "Não foi possível obter as taxas de câmbio. Tente novamente mais tarde.",
    ),
    ("unsupportedCurrency", "Moeda não suportada: {code}"),
    ("fetchingRates", "Buscando taxas de câmbio..."),
    ("currencyCode", "Código"),
    ("currencyName", "Moeda"),
    ("unit", "Unidade"),
    ("value", "Valor"),
    ("length", "Comprimento"),
    ("weight", "Peso"),
    ("temperature", "Temperatura"),
    ("area", "Área"),
    ("volume", "Volume"),
    ("speed", "Velocidade"),
    ("kilometers", "Quilômetros"),
    ("miles", "Milhas"),
    ("kilograms", "Quilogramas"),
    ("pounds", "Libras"),
    ("celsius", "Celsius"),
    ("fahrenheit", "Fahrenheit"),
    ("kelvin", "Kelvin"),
    ("squareMeters", "Metros quadrados"),
    ("squareFeet", "Pés quadrados"),
    ("liters", "Litros"),
    ("gallons", "Galões"),
    ("kmh", "Quilômetros por hora"),
    ("mph", "Milhas por hora"),
    ("interestCalculator", "Calculadora de Juros"),
    ("simpleInterest", "Juros simples"),
    ("compoundInterest", "Juros compostos"),
    ("principalAmount", "Valor principal"),
    ("annualInterestRate", "Taxa de juros anual (%)"),
    ("timeYears", "Tempo (anos)"),
    ("compoundsPerYear", "Capitalizações por ano"),
    ("totalInterest", "Total de juros"),
    ("totalValue", "Valor total"),
    ("loanCalculator", "Calculadora de Empréstimo"),
    ("loanAmount", "Valor do empréstimo"),
    ("loanTermYears", "Prazo (anos)"),
    ("monthlyPayment", "Parcela mensal"),
    ("totalPayment", "Pagamento total"),
    ("tipCalculator", "Calculadora de Gorjeta"),
    ("billAmount", "Valor da conta"),
    ("tipPercentage", "Gorjeta (%)"),
    ("numberOfPeople", "Número de pessoas"),
    ("tipAmount", "Valor da gorjeta"),
    ("totalBill", "Total da conta"),
    ("totalPerPerson", "Total por pessoa"),
    ("bmiCalculator", "Calculadora de IMC"),
    ("calorieCalculator", "Calculadora de Calorias"),
    ("height", "Altura (cm)"),
    ("weightKg", "Peso (kg)"),
    ("age", "Idade"),
    ("gender", "Gênero"),
    ("male", "Masculino"),
    ("female", "Feminino"),
    ("yourBmi", "Seu IMC"),
    ("bmiCategory", "Categoria"),
    ("bmiRange", "Faixa de IMC"),
    ("underweight", "Abaixo do peso"),
    ("normalWeight", "Peso normal"),
    ("overweight", "Sobrepeso"),
    ("obese", "Obesidade"),
    ("bmiRangeUnderweight", "Abaixo de 18,5"),
    ("bmiRangeNormal", "18,5 - 24,9"),
    ("bmiRangeOverweight", "25,0 - 29,9"),
    ("bmiRangeObese", "30,0 ou mais"),
    ("estDailyCalories", "Calorias diárias estimadas"),
    ("sedentaryLifestyle", "Com base em um estilo de vida sedentário"),
    ("advertisement", "Publicidade"),
    ("adPlaceholder", "Seu anúncio aqui"),
];

/// Looks up display strings for the active language, falling back to
/// English and then to the key itself.
#[derive(Debug, Clone)]
pub struct Translator {
    language: Language,
    active: HashMap<&'static str, &'static str>,
    fallback: HashMap<&'static str, &'static str>,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        let table = match language {
            Language::En => EN,
            Language::Pt => PT,
        };
        Self {
            language,
            active: table.iter().copied().collect(),
            fallback: EN.iter().copied().collect(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }

    /// Translates `key` and replaces every `{name}` with its value.
    pub fn t_with(&self, key: &str, replacements: &[(&str, &str)]) -> String {
        let mut translation = self
            .active
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map_or_else(|| key.to_string(), |s| s.to_string());

        for (name, value) in replacements {
            translation = translation.replace(&format!("{{{name}}}"), value);
        }
        translation
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_language_lookup() {
        assert_eq!(Translator::new(Language::Pt).t("convert_unknown"), "convert_unknown");
        assert_eq!(Translator::new(Language::Pt).t("result"), "Resultado");
        assert_eq!(Translator::new(Language::En).t("result"), "Result");
    }

    #[test]
    fn test_falls_back_to_english() {
        let translator = Translator::new(Language::Pt);
        assert_eq!(
            translator.t_with("shellWelcome", &[("lang", "pt")]),
            "Interactive mode (pt). Type a command, 'help' or 'exit'."
        );
    }

    #[test]
    fn test_placeholder_substitution() {
        let translator = Translator::new(Language::En);
        assert_eq!(
            translator.t_with("unsupportedCurrency", &[("code", "XYZ")]),
            "Unsupported currency: XYZ"
        );
        // Unused replacements are ignored
        assert_eq!(translator.t_with("result", &[("code", "XYZ")]), "Result");
    }

    #[test]
    fn test_every_portuguese_key_exists_in_english() {
        let english: HashMap<_, _> = EN.iter().copied().collect();
        for (key, _) in PT {
            assert!(english.contains_key(key), "missing English string for {key}");
        }
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::Pt);
    }
}
